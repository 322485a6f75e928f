fn main() -> anyhow::Result<()> {
    voidpak::cli::run_cli()
}
