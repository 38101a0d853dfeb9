//! Runtime data model shared by the evaluator and embedding hosts.
//!
//! - [`Value`]: every value a script can hold
//! - [`Namespace`]: dynamically extensible name tables (modules, globals)
//! - [`host`]: the explicit registration table through which host types,
//!   members and constructors are exposed to scripts
//! - [`EvalError`]: runtime failures, including late-binding failures

mod errors;
mod function;
pub mod host;
mod list;
mod namespace;
mod value;

pub use errors::{
    division_by_zero, host_error, import_not_found, index_out_of_bounds, invalid_operand,
    io_error, missing_member, no_matching_constructor, no_matching_overload, not_a_type,
    not_callable, not_indexable, operator_type_mismatch, read_only_member, runtime_dropped,
    wrong_argument_count, EvalError, EvalErrorKind, EvalResult,
};
pub use function::{FunctionValue, NativeFunction, ScriptCallable};
pub use host::{
    meta_type, HostConstructor, HostIndexer, HostMethod, HostObject, HostProperty, HostType,
    HostTypeBuilder, HostTypeId, HostUnit, Param, ParamType, PrimitiveKind,
    TypeLibrary,
};
pub use list::List;
pub use namespace::Namespace;
pub use value::{Shape, TypeHandle, Value};
