fn main() {
    herorank::logging::init();
    let args: Vec<String> = std::env::args().collect();
    std::process::exit(herorank::cli::run_with_args(&args));
}
