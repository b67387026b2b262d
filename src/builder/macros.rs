//! Macros for ergonomic state machine construction.

/// Generate a state enum and its `State` implementation.
///
/// Each variant is paired with the name used in logs and serialization.
///
/// # Example
///
/// ```
/// use polybasic::core::State;
/// use polybasic::state_enum;
///
/// state_enum! {
///     pub enum UploadState {
///         Idle => "idle",
///         Uploading => "uploading",
///         Done => "done",
///         Failed => "failed",
///     }
///     final: [Done, Failed]
///     error: [Failed]
/// }
///
/// assert_eq!(UploadState::Uploading.name(), "uploading");
/// assert_eq!(UploadState::all().len(), 4);
/// assert!(UploadState::Failed.is_error());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $label)]
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $label),*
                }
            }

            fn all() -> Vec<Self> {
                vec![$(Self::$variant),*]
            }

            #[allow(unreachable_patterns)]
            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            #[allow(unreachable_patterns)]
            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    _ => false,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum TestState {
            Initial => "initial",
            Processing => "processing",
            Complete => "complete",
            Failed => "failed",
        }
        final: [Complete, Failed]
        error: [Failed]
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        let state = TestState::Initial;
        assert_eq!(state.name(), "initial");
        assert!(!state.is_final());
        assert!(!state.is_error());

        let complete = TestState::Complete;
        assert!(complete.is_final());
        assert!(!complete.is_error());

        let failed = TestState::Failed;
        assert!(failed.is_final());
        assert!(failed.is_error());
    }

    #[test]
    fn state_enum_lists_variants_in_order() {
        assert_eq!(
            TestState::all(),
            vec![
                TestState::Initial,
                TestState::Processing,
                TestState::Complete,
                TestState::Failed
            ]
        );
    }

    #[test]
    fn state_enum_serializes_with_labels() {
        let json = serde_json::to_string(&TestState::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
        let back: TestState = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(back, TestState::Failed);
        assert_eq!(TestState::Complete.to_string(), "complete");
    }

    #[test]
    fn state_enum_works_without_final_error() {
        state_enum! {
            enum MinimalState {
                One => "one",
                Two => "two",
            }
        }

        let state = MinimalState::One;
        assert!(!state.is_final());
        assert!(!state.is_error());
        assert_eq!(MinimalState::Two.name(), "two");
    }
}
