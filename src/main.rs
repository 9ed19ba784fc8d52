fn main() -> anyhow::Result<()> {
    endpointgen::cli::run_cli()
}
