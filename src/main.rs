fn main() {
    frog::cli::run();
}
