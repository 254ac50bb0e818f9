//! Short binary name (`jn`) that forwards to the `journal` library.

fn main() {
    if let Err(err) = journal::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
