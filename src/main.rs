use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = sector_sort::cli::parse();
    app::run(args)
}
