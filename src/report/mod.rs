//! Report layer: renders a run outcome into a bounded-size chat message.

pub mod webhook;

use crate::reconcile::outcome::RunOutcome;

/// Stay under the webhook's documented ~3000-character payload cap.
pub const MAX_MESSAGE_CHARS: usize = 2900;
pub const TRUNCATION_NOTICE: &str = "… (truncated: report exceeded the webhook size limit)";

/// Whether empty failed / still-pending sections appear in the message.
/// One policy per run; the default omits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionPolicy {
    OmitEmpty,
    Always,
}

/// Deterministic in (outcome, policy): identical inputs render to
/// byte-identical output.
pub fn render(outcome: &RunOutcome, policy: SectionPolicy) -> String {
    let c = &outcome.classification;
    let mut msg = String::new();

    msg.push_str(&format!(
        "📦 Podman auto-update report for {}\n",
        outcome.collected_at
    ));
    msg.push_str(&format!(
        "Summary: checked={} updated={} failed={} pending={} current={} excluded={}\n",
        outcome.checked.len(),
        c.updated.len(),
        c.failed.len(),
        c.still_pending.len(),
        c.current.len(),
        outcome.excluded.len(),
    ));

    let checked_lines: Vec<String> = outcome
        .checked
        .iter()
        .map(|cc| format!("{} ({})", cc.name, cc.unit))
        .collect();
    push_section(&mut msg, "Containers checked (with systemd unit):", &checked_lines);
    push_section(&mut msg, "Containers excluded (no unit label):", &outcome.excluded);
    push_section(&mut msg, "Containers updated during this run:", &c.updated);

    if policy == SectionPolicy::Always || !c.failed.is_empty() {
        push_section(&mut msg, "Containers that failed to update:", &c.failed);
    }
    if policy == SectionPolicy::Always || !c.still_pending.is_empty() {
        push_section(&mut msg, "Containers still needing updates:", &c.still_pending);
    }

    push_section(&mut msg, "Containers already up to date:", &c.current);

    clamp_message(&msg)
}

fn push_section(buf: &mut String, title: &str, items: &[String]) {
    buf.push('\n');
    buf.push_str(title);
    buf.push('\n');
    if items.is_empty() {
        buf.push_str("  None\n");
    } else {
        for item in items {
            buf.push_str(&format!("  • {}\n", item));
        }
    }
}

/// Enforce the size cap on whole-line boundaries, so no character or bullet
/// is ever split mid-sequence. Over-limit messages keep the longest line
/// prefix that fits and gain an explicit notice.
fn clamp_message(message: &str) -> String {
    if message.chars().count() <= MAX_MESSAGE_CHARS {
        return message.to_string();
    }

    let mut kept = String::new();
    let mut kept_chars = 0usize;
    for line in message.split_inclusive('\n') {
        let line_chars = line.chars().count();
        if kept_chars + line_chars > MAX_MESSAGE_CHARS {
            break;
        }
        kept.push_str(line);
        kept_chars += line_chars;
    }

    if !kept.is_empty() && !kept.ends_with('\n') {
        kept.push('\n');
    }
    kept.push_str(TRUNCATION_NOTICE);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::classify::Classification;
    use crate::reconcile::outcome::CheckedContainer;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn outcome_with(classification: Classification) -> RunOutcome {
        RunOutcome {
            collected_at: "2026-08-07".to_string(),
            checked: vec![CheckedContainer {
                name: "web".to_string(),
                unit: "container-web.service".to_string(),
            }],
            excluded: names(&["scratch"]),
            classification,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn updated_run_renders_expected_sections() {
        let outcome = outcome_with(Classification {
            updated: names(&["web"]),
            ..Classification::default()
        });
        let msg = render(&outcome, SectionPolicy::OmitEmpty);

        assert!(msg.contains("Podman auto-update report for 2026-08-07"));
        assert!(msg.contains("checked=1 updated=1 failed=0 pending=0 current=0 excluded=1"));
        assert!(msg.contains("Containers checked (with systemd unit):\n  • web (container-web.service)"));
        assert!(msg.contains("Containers updated during this run:\n  • web"));
        assert!(msg.contains("Containers excluded (no unit label):\n  • scratch"));
    }

    #[test]
    fn still_pending_section_appears_when_nonempty() {
        let outcome = outcome_with(Classification {
            still_pending: names(&["web"]),
            ..Classification::default()
        });
        let msg = render(&outcome, SectionPolicy::OmitEmpty);
        assert!(msg.contains("Containers still needing updates:\n  • web"));
        // updated nothing this run
        assert!(msg.contains("Containers updated during this run:\n  None"));
    }

    #[test]
    fn omit_empty_hides_failed_and_pending_sections() {
        let msg = render(&outcome_with(Classification::default()), SectionPolicy::OmitEmpty);
        assert!(!msg.contains("Containers that failed to update:"));
        assert!(!msg.contains("Containers still needing updates:"));
        // always-present sections still render their placeholder
        assert!(msg.contains("Containers updated during this run:\n  None"));
        assert!(msg.contains("Containers already up to date:\n  None"));
    }

    #[test]
    fn always_policy_renders_every_section() {
        let msg = render(&outcome_with(Classification::default()), SectionPolicy::Always);
        assert!(msg.contains("Containers that failed to update:\n  None"));
        assert!(msg.contains("Containers still needing updates:\n  None"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let outcome = outcome_with(Classification {
            updated: names(&["web"]),
            ..Classification::default()
        });
        assert_eq!(
            render(&outcome, SectionPolicy::OmitEmpty),
            render(&outcome, SectionPolicy::OmitEmpty)
        );
    }

    #[test]
    fn short_messages_pass_through_unchanged() {
        let msg = "header\nline one\nline two\n";
        assert_eq!(clamp_message(msg), msg);
    }

    #[test]
    fn long_messages_keep_whole_lines_and_gain_notice() {
        let mut msg = String::new();
        for i in 0..400 {
            msg.push_str(&format!("  • container-number-{:03}\n", i));
        }
        assert!(msg.chars().count() > MAX_MESSAGE_CHARS);

        let clamped = clamp_message(&msg);
        let body = clamped.strip_suffix(TRUNCATION_NOTICE).unwrap();
        assert!(msg.starts_with(body), "kept portion must be a prefix");
        assert!(body.ends_with('\n'), "cut lands on a line boundary");
        assert!(body.chars().count() <= MAX_MESSAGE_CHARS);
    }

    #[test]
    fn clamp_never_splits_multibyte_bullets() {
        // every line starts with a 3-byte bullet; a byte-offset cut would
        // panic or emit broken UTF-8
        let mut msg = String::new();
        for _ in 0..2000 {
            msg.push_str("• x\n");
        }
        let clamped = clamp_message(&msg);
        let body = clamped.strip_suffix(TRUNCATION_NOTICE).unwrap();
        assert!(body.lines().all(|l| l == "• x"), "no line was cut mid-bullet");
        assert!(body.chars().count() <= MAX_MESSAGE_CHARS);
    }
}
