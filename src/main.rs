fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Non-interactive wizard contract proof mode (for automated checks / log capture).
    // Writes `form_contract_smoke_transcript.log` under the log folder and exits 0/1.
    if args.iter().any(|a| a == "--contract-smoke") {
        applyform::run_contract_smoke();
        return;
    }

    // Non-interactive TUI smoke test mode (for automated checks).
    // Renders a single frame for a specific page and exits 0.
    // Usage: --smoke or --smoke=personal|education|experience|skills|family|documents|submitted|cancel|browse
    if let Some(arg) = args
        .iter()
        .find(|a| a.as_str() == "--smoke" || a.starts_with("--smoke="))
    {
        let target = arg
            .split_once('=')
            .map(|(_, v)| v.to_string())
            .filter(|v| !v.trim().is_empty());
        applyform::run_tui_smoke(target);
        return;
    }

    // Default: interactive terminal wizard.
    applyform::run_tui();
}
