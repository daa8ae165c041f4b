use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = file_helper::cli::parse();
    app::run(args)
}
