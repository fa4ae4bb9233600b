fn main() {
    if let Err(err) = clsview_cli::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
