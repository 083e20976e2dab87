#[beacon_derive::beacon_error]
pub struct LoadError {
    message: String,
}

fn main() {}
