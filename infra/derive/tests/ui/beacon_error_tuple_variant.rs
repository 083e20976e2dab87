#[beacon_derive::beacon_error]
pub enum LoadError {
    Io(std::io::Error),
}

fn main() {}
