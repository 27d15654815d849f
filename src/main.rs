fn main() {
    if let Err(e) = hed::cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
