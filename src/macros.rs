#[macro_export]
/// Log a fatal planner error and return it from the enclosing function.
///
/// Usage:
/// fatal!(PlannerError::MissingCoset(None));
/// fatal!(PlannerError::InvalidStart(name), "start state {:?} is invalid", state);
/// equivalent to:
/// tracing::error!(...); return Err(PlannerError::...into());
macro_rules! fatal {
    ($err:expr) => {{
        let err = $err;
        tracing::error!("{}", err);
        return Err(err.into());
    }};

    ($err:expr, $($arg:tt)+) => {{
        let err = $err;
        tracing::error!($($arg)+);
        tracing::error!("{}", err);
        return Err(err.into());
    }};
}
