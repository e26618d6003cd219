fn main() -> anyhow::Result<()> {
    sciplens_cli::run()
}
