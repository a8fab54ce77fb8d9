//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants from async
//! blocks and delayed actions.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use playgrounds_core::async_effect;
///
/// async_effect! {
///     let slots = client.fetch_slots(&query).await;
///     Some(BookingAction::SlotsLoaded {
///         request_seq,
///         result: slots.map_err(|e| e.to_string()),
///     })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use playgrounds_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_secs(30),
///     action: BookingAction::SessionExpired
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::Effect;
    use std::time::Duration;

    #[derive(Clone, Debug)]
    enum TestAction {
        AsyncResult { value: i32 },
        TimeoutExpired,
    }

    #[test]
    fn test_async_effect_macro() {
        let effect = async_effect! {
            // Simulate async work
            Some(TestAction::AsyncResult { value: 42 })
        };

        assert!(matches!(effect, Effect::Future(_)));
    }

    #[test]
    fn test_delay_macro() {
        let effect = delay! {
            duration: Duration::from_secs(30),
            action: TestAction::TimeoutExpired
        };

        assert!(matches!(effect, Effect::Delay { .. }));
    }
}
