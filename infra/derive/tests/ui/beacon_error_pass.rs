use beacon_derive::beacon_error;
use std::borrow::Cow;

#[beacon_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let _from_str: DemoError = "boom".into();
    let _from_io: DemoError = std::io::Error::other("disk").into();
}
