//! How-to instructions shown by the info screen and the `info` command.

/// A titled group of instructions.
#[derive(Debug, Clone, Copy)]
pub struct GuideSection {
    pub title: &'static str,
    pub lines: &'static [&'static str],
}

/// All sections in display order.
pub const GUIDE: &[GuideSection] = &[
    GuideSection {
        title: "1. CLASSIC KEGELS",
        lines: &[
            "Identify your pelvic floor muscles (the ones used to stop urine).",
            "SQUEEZE: Tighten these muscles and hold.",
            "REST: Completely relax the muscles.",
        ],
    },
    GuideSection {
        title: "2. PULSE KEGELS",
        lines: &[
            "Rapidly tighten and relax the pelvic floor muscles.",
            "Do not hold. Squeeze then immediately release.",
        ],
    },
    GuideSection {
        title: "3. GENERAL TIPS",
        lines: &[
            "Breathe normally throughout the exercises.",
            "Avoid tensing your abdomen, buttocks, or thighs.",
            "Focus only on your pelvic floor muscles.",
            "Start slowly and gradually increase intensity.",
            "Consistency is more important than intensity.",
        ],
    },
    GuideSection {
        title: "4. IMPORTANT NOTES",
        lines: &[
            "Stop if you feel pain or discomfort.",
            "Consult a healthcare professional if you have concerns.",
            "Perfect your technique before increasing difficulty.",
        ],
    },
];

/// Plain-text rendering for the terminal.
pub fn render_plain() -> String {
    let mut out = String::from("HOW TO KEGEL\n");
    for section in GUIDE {
        out.push('\n');
        out.push_str(section.title);
        out.push('\n');
        for line in section.lines {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_includes_every_section() {
        let text = render_plain();
        for section in GUIDE {
            assert!(text.contains(section.title));
        }
        assert!(text.contains("SQUEEZE: Tighten"));
    }
}
