fn main() {
    dataflow::app::cli::run();
}
