fn main() {
    if let Err(err) = retail_loader::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
