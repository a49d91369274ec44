mod command;
mod record;
mod render;
mod shell;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
