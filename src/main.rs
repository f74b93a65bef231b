fn main() {
    if let Err(err) = compose_graph::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
