fn main() {
    std::process::exit(ceds_freeze_cli::cli::run_from_env());
}
