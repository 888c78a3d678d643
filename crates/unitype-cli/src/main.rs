fn main() {
    unitype_cli::run_main();
}
