use anyhow::Result;

fn main() -> Result<()> {
    knowcode_cli::main_entry()
}
