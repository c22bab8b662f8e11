use super::CommandDef;

pub(super) fn score_match(q: &str, candidate: &str) -> i32 {
    let q = q.to_lowercase();
    let c = candidate.to_lowercase();
    if c == q {
        return 100;
    }
    if c.starts_with(&q) {
        return 50 - (c.len() as i32 - q.len() as i32);
    }
    if c.contains(&q) {
        return 10;
    }
    0
}

/// Best score of a command over its name and aliases.
pub(super) fn score_def(q: &str, def: &CommandDef) -> i32 {
    def.aliases
        .iter()
        .fold(score_match(q, def.name), |best, a| best.max(score_match(q, a)))
}

/// Highest score first. View-specific commands win ties over global ones,
/// then alphabetical.
pub(super) fn sort_scored_suggestions(scored: &mut [(i32, CommandDef)], view_commands: &[&str]) {
    scored.sort_by(|(sa, a), (sb, b)| {
        let va = view_commands.contains(&a.name);
        let vb = view_commands.contains(&b.name);
        sb.cmp(sa)
            .then_with(|| vb.cmp(&va))
            .then_with(|| a.name.cmp(b.name))
    });
}

#[cfg(test)]
#[path = "../tests/tui_shell/suggest_tests.rs"]
mod tests;
