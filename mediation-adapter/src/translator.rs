//! Maps SDK callbacks onto the normalized event vocabulary

use display_sdk::{SdkError, SdkEvent, VideoEvent};
use mediation_types::{ErrorKind, NormalizedEvent, Reward};

/// Error kind for a failed load; first match wins
pub fn load_error_kind(error: &SdkError) -> ErrorKind {
    match error {
        SdkError::NoAd(_) => ErrorKind::NoFill,
        SdkError::Timeout(_) => ErrorKind::Timeout,
        _ => ErrorKind::Unspecified,
    }
}

/// Error kind for a failed display, whatever the cause
pub fn display_error_kind(_error: &SdkError) -> ErrorKind {
    ErrorKind::InternalError
}

/// Normalize one SDK event
///
/// Returns `None` for events with no outward equivalent.
pub fn translate(event: &SdkEvent) -> Option<NormalizedEvent> {
    let normalized = match event {
        SdkEvent::Loaded | SdkEvent::NativeLoaded(_) => NormalizedEvent::Loaded,
        SdkEvent::LoadFailed(error) => NormalizedEvent::LoadFailed {
            error: load_error_kind(error),
        },
        SdkEvent::Shown => NormalizedEvent::Displayed,
        SdkEvent::ShowFailed(error) => NormalizedEvent::DisplayFailed {
            error: display_error_kind(error),
        },
        SdkEvent::Clicked => NormalizedEvent::Clicked,
        SdkEvent::Expanded => NormalizedEvent::Expanded,
        SdkEvent::Collapsed => NormalizedEvent::Collapsed,
        SdkEvent::Closed => NormalizedEvent::Hidden,
        SdkEvent::RewardReceived { currency, amount } => NormalizedEvent::UserRewarded {
            reward: Reward::from_sdk_amount(currency.clone(), *amount),
        },
        SdkEvent::Video(VideoEvent::Started) => NormalizedEvent::VideoStarted,
        SdkEvent::Video(VideoEvent::Completed) => NormalizedEvent::VideoCompleted,
        SdkEvent::Video(VideoEvent::Other(_))
        | SdkEvent::Resized
        | SdkEvent::AudioStarted
        | SdkEvent::AudioStopped
        | SdkEvent::EndCardDisplayed => return None,
    };
    Some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SdkError::NoAd("empty".into()), ErrorKind::NoFill)]
    #[case(SdkError::Timeout("10s".into()), ErrorKind::Timeout)]
    #[case(SdkError::Network("offline".into()), ErrorKind::Unspecified)]
    #[case(SdkError::InvalidParameter("site".into()), ErrorKind::Unspecified)]
    #[case(SdkError::Unsupported("rewarded video"), ErrorKind::Unspecified)]
    #[case(SdkError::Other("?".into()), ErrorKind::Unspecified)]
    fn test_load_error_kind(#[case] error: SdkError, #[case] expected: ErrorKind) {
        assert_eq!(load_error_kind(&error), expected);
    }

    #[rstest]
    #[case(SdkError::NoAd("gone".into()))]
    #[case(SdkError::Timeout("slow".into()))]
    #[case(SdkError::Other("renderer".into()))]
    fn test_show_failures_are_internal(#[case] error: SdkError) {
        assert_eq!(
            translate(&SdkEvent::ShowFailed(error)),
            Some(NormalizedEvent::DisplayFailed {
                error: ErrorKind::InternalError
            })
        );
    }

    #[rstest]
    #[case(SdkEvent::Loaded, Some(NormalizedEvent::Loaded))]
    #[case(SdkEvent::Shown, Some(NormalizedEvent::Displayed))]
    #[case(SdkEvent::Closed, Some(NormalizedEvent::Hidden))]
    #[case(SdkEvent::Clicked, Some(NormalizedEvent::Clicked))]
    #[case(SdkEvent::Expanded, Some(NormalizedEvent::Expanded))]
    #[case(SdkEvent::Collapsed, Some(NormalizedEvent::Collapsed))]
    #[case(SdkEvent::Video(VideoEvent::Started), Some(NormalizedEvent::VideoStarted))]
    #[case(SdkEvent::Video(VideoEvent::Completed), Some(NormalizedEvent::VideoCompleted))]
    #[case(SdkEvent::Video(VideoEvent::Other(3)), None)]
    #[case(SdkEvent::Resized, None)]
    #[case(SdkEvent::AudioStarted, None)]
    #[case(SdkEvent::AudioStopped, None)]
    #[case(SdkEvent::EndCardDisplayed, None)]
    fn test_translate(#[case] event: SdkEvent, #[case] expected: Option<NormalizedEvent>) {
        assert_eq!(translate(&event), expected);
    }

    #[test]
    fn test_reward_amount_truncates() {
        let event = SdkEvent::RewardReceived {
            currency: "coins".into(),
            amount: 5.9,
        };
        match translate(&event) {
            Some(NormalizedEvent::UserRewarded { reward }) => {
                assert_eq!(reward.label, "coins");
                assert_eq!(reward.amount, 5);
            }
            other => panic!("unexpected translation: {:?}", other),
        }
    }
}
