use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    charmeur::cli::main()
}
