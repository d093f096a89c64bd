fn main() {
    if let Err(err) = data_insights::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
