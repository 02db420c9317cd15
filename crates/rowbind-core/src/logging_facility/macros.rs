//! Operation logging macros
//!
//! Each façade operation logs exactly one `start` and one `end` or
//! `end_error` event. `component` is the calling module's path.

/// Log the start of an operation
///
/// ```
/// # use rowbind_core::log_op_start;
/// log_op_start!("db_create");
/// log_op_start!("db_create", table = "users");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use rowbind_core::log_op_end;
/// log_op_end!("db_select", duration_ms = 3);
/// log_op_end!("db_select", duration_ms = 3, row_count = 10);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log a failed operation with the error's kind and code
///
/// `$err` is borrowed and must implement `rowbind_core::errors::Classified`.
///
/// ```
/// # use rowbind_core::{log_op_error, RowbindError};
/// let err = RowbindError::NoColumnTypeDefined { column: "id".to_string() };
/// log_op_error!("db_create", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::Classified;
        let classified = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?classified.kind(),
            err.code = classified.code(),
            error = %classified,
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::Classified;
        let classified = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?classified.kind(),
            err.code = classified.code(),
            error = %classified,
            $($field)*
        );
    }};
}
