use complygate::gates::Gate;

fn main() {
    let gate = Gate::Evidence("sprint5".to_string());
    std::process::exit(complygate::run_standalone(gate));
}
