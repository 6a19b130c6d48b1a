fn main() {
    if let Err(e) = linalg_script::core::Engine::run() {
        eprintln!("linalg_script failed: {}", e);
        std::process::exit(1);
    }
}
