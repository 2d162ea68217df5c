use mri_core::{Action, AppViewModel, Phase, ResultView, Theme, MEDICAL_DISCLAIMER};

/// ANSI colours per theme. Light terminals get the darker shades.
struct Palette {
    title: &'static str,
    good: &'static str,
    alert: &'static str,
    muted: &'static str,
    reset: &'static str,
}

const LIGHT: Palette = Palette {
    title: "\x1b[1;34m",
    good: "\x1b[32m",
    alert: "\x1b[31m",
    muted: "\x1b[90m",
    reset: "\x1b[0m",
};

const DARK: Palette = Palette {
    title: "\x1b[1;96m",
    good: "\x1b[92m",
    alert: "\x1b[91m",
    muted: "\x1b[37m",
    reset: "\x1b[0m",
};

fn palette(theme: Theme) -> &'static Palette {
    if theme.is_dark() {
        &DARK
    } else {
        &LIGHT
    }
}

pub fn render(view: &AppViewModel, theme: Theme) -> Vec<String> {
    let p = palette(theme);
    let mut lines = Vec::new();

    lines.push(format!("{}== Brain MRI Analysis =={}", p.title, p.reset));
    lines.push(format!("Status: {}", phase_label(view.phase)));

    match (&view.file_name, view.file_size) {
        (Some(name), Some(size)) => lines.push(format!("File: {name} ({})", format_size(size))),
        (Some(name), None) => lines.push(format!("File: {name}")),
        _ => lines.push(format!(
            "{}No scan selected; use 'open <path>' (JPEG or PNG, max 5MB){}",
            p.muted, p.reset
        )),
    }

    if view.preview_pending {
        lines.push(format!("{}Preview: loading...{}", p.muted, p.reset));
    } else if let Some(preview) = &view.preview {
        lines.push(format!(
            "Preview: ready ({} encoded)",
            format_size(preview.len() as u64)
        ));
    }

    if let Some(result) = &view.result {
        render_result(&mut lines, result, p);
    }

    if let Some(error) = &view.error {
        lines.push(format!("{}Error: {error}{}", p.alert, p.reset));
    }
    if let Some(note) = &view.status_note {
        lines.push(format!("{}{note}{}", p.muted, p.reset));
    }

    lines.push(format!("Actions: {}", action_list(&view.actions)));
    lines
}

fn render_result(lines: &mut Vec<String>, result: &ResultView, p: &Palette) {
    let colour = if result.detected { p.alert } else { p.good };
    lines.push(format!("{colour}{}{}", result.headline, p.reset));
    lines.push(result.summary.clone());
    if let Some(kind) = result.tumor_type {
        lines.push(format!("Tumor type: {kind}"));
    }
    lines.push(format!(
        "Confidence: {} {}",
        result.confidence_label,
        confidence_bar(result.confidence)
    ));
    lines.push(format!("{}{MEDICAL_DISCLAIMER}{}", p.muted, p.reset));
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Waiting for an MRI scan",
        Phase::Previewing => "Ready to analyze",
        Phase::Analyzing => "Analyzing...",
        Phase::Result => "Analysis complete",
        Phase::Error => "Analysis failed",
    }
}

fn action_list(actions: &[Action]) -> String {
    actions
        .iter()
        .map(|action| match action {
            Action::Select => "open <path>",
            Action::Analyze => "analyze",
            Action::Retry => "retry",
            Action::Reset => "reset",
            Action::Export => "export",
            Action::Dismiss => "dismiss",
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Twenty-cell bar, one cell per five percent.
fn confidence_bar(confidence: u8) -> String {
    let filled = usize::from(confidence.min(100)) / 5;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(20 - filled))
}

fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use mri_core::{
        Action, AppViewModel, ClassificationResult, Phase, PreviewArtifact, ResultView, Theme,
        TumorType, MEDICAL_DISCLAIMER,
    };

    use super::{confidence_bar, format_size, render};

    fn result_view(result: ClassificationResult) -> AppViewModel {
        AppViewModel {
            phase: Phase::Result,
            file_name: Some("axial.png".to_string()),
            file_size: Some(2048),
            preview: Some(PreviewArtifact::new("data:image/png;base64,AAAA")),
            result: Some(ResultView::from(result)),
            actions: vec![Action::Select, Action::Export, Action::Reset],
            ..AppViewModel::default()
        }
    }

    #[test]
    fn idle_screen_prompts_for_a_file() {
        let view = AppViewModel {
            actions: vec![Action::Select],
            ..AppViewModel::default()
        };
        let lines = render(&view, Theme::Light);
        assert!(lines.iter().any(|l| l.contains("Waiting for an MRI scan")));
        assert!(lines.iter().any(|l| l.contains("max 5MB")));
        assert_eq!(lines.last().map(String::as_str), Some("Actions: open <path>"));
    }

    #[test]
    fn tumor_result_shows_type_confidence_and_disclaimer() {
        let view = result_view(ClassificationResult::tumor(TumorType::Glioma, 88));
        let text = render(&view, Theme::Dark).join("\n");
        assert!(text.contains("Tumor Detected"));
        assert!(text.contains("Tumor type: Glioma"));
        assert!(text.contains("Confidence: 88%"));
        assert!(text.contains(MEDICAL_DISCLAIMER));
        assert!(text.contains("File: axial.png (2.0 KB)"));
        assert!(text.contains("Actions: open <path>, export, reset"));
    }

    #[test]
    fn no_tumor_result_has_no_type_line() {
        let view = result_view(ClassificationResult::no_tumor(95));
        let text = render(&view, Theme::Light).join("\n");
        assert!(text.contains("No Tumor Detected"));
        assert!(!text.contains("Tumor type:"));
        assert!(text.contains("Confidence: 95%"));
    }

    #[test]
    fn error_and_pending_preview_are_visible() {
        let view = AppViewModel {
            phase: Phase::Idle,
            error: Some("File size must be less than 5MB".to_string()),
            actions: vec![Action::Select, Action::Dismiss],
            ..AppViewModel::default()
        };
        let text = render(&view, Theme::Light).join("\n");
        assert!(text.contains("Error: File size must be less than 5MB"));

        let view = AppViewModel {
            phase: Phase::Previewing,
            file_name: Some("scan.jpg".to_string()),
            preview_pending: true,
            ..AppViewModel::default()
        };
        let text = render(&view, Theme::Light).join("\n");
        assert!(text.contains("Preview: loading..."));
    }

    #[test]
    fn themes_use_different_colours() {
        let view = result_view(ClassificationResult::no_tumor(70));
        assert_ne!(render(&view, Theme::Light), render(&view, Theme::Dark));
    }

    #[test]
    fn helpers_format_sizes_and_bars() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(confidence_bar(100), format!("[{}]", "#".repeat(20)));
        assert_eq!(confidence_bar(0), format!("[{}]", ".".repeat(20)));
        assert_eq!(confidence_bar(88), format!("[{}{}]", "#".repeat(17), "..."));
    }
}
