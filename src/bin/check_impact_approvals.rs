use complygate::gates::Gate;

fn main() {
    std::process::exit(complygate::run_standalone(Gate::Approvals));
}
