//! `System.Text.StringBuilder`.

use std::sync::Arc;

use brisk_value::{host_error, HostType, ParamType, Value};
use parking_lot::Mutex;

use super::{char_len, str_arg};

/// Payload of a script-side `StringBuilder`.
#[derive(Default, Debug)]
pub struct StringBuilder(Mutex<String>);

impl StringBuilder {
    pub fn contents(&self) -> String {
        self.0.lock().clone()
    }
}

pub(super) fn string_builder_type() -> Arc<HostType> {
    HostType::builder("System.Text.StringBuilder")
        .constructor_of(Vec::<ParamType>::new(), |_| Ok(StringBuilder::default()))
        .constructor_of([ParamType::Str], |args| {
            Ok(StringBuilder(Mutex::new(
                str_arg(args, 0, "StringBuilder")?.to_string(),
            )))
        })
        // returns the receiver so appends chain
        .method("Append", [ParamType::Any], |recv, args| {
            let builder = recv
                .downcast_ref::<StringBuilder>()
                .ok_or_else(|| host_error("`Append` called on the wrong receiver"))?;
            if let Some(value) = args.first() {
                builder.0.lock().push_str(&value.to_string());
            }
            Ok(recv.clone())
        })
        .method_of("ToString", Vec::<ParamType>::new(), |sb: &StringBuilder, _| {
            Ok(Value::string(sb.contents()))
        })
        .property_of("Length", |sb: &StringBuilder| Ok(char_len(&sb.0.lock())))
        .build()
}
