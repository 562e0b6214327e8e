pub fn main() {
    std::process::exit(sqlsect::run_with_args(std::env::args_os()));
}
