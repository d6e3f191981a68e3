use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("only mono and stereo input is supported ({0} channels found)")]
    UnsupportedChannelCount(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_channel_count_names_the_count() {
        let err = DomainError::UnsupportedChannelCount(6);
        assert_eq!(
            err.to_string(),
            "only mono and stereo input is supported (6 channels found)"
        );
    }
}
