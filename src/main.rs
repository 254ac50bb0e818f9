fn main() {
    if let Err(err) = journal::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
