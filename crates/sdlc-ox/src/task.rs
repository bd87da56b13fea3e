/// The kind of request being dispatched. Drives template selection and,
/// for the direct backend, the sampling temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum TaskKind {
    General,
    Code,
    Test,
    Fix,
    Summarize,
    Classify,
    Chat,
}

impl TaskKind {
    /// Classification needs near-deterministic output so its JSON stays
    /// parseable; everything else generates at a moderate temperature.
    #[must_use]
    pub fn temperature(self) -> f32 {
        match self {
            TaskKind::Classify => 0.1,
            _ => 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_near_deterministic() {
        assert_eq!(TaskKind::Classify.temperature(), 0.1);
        assert_eq!(TaskKind::Code.temperature(), 0.7);
        assert_eq!(TaskKind::Chat.temperature(), 0.7);
    }

    #[test]
    fn kinds_have_stable_names() {
        assert_eq!(TaskKind::Classify.to_string(), "classify");
        assert_eq!("fix".parse::<TaskKind>(), Ok(TaskKind::Fix));
    }
}
