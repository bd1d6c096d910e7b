use crate::error::Result;
use crate::model::Collection;

pub enum Encodable<'a> {
    Collection(&'a Collection),
    Insight(&'a str),
}

pub trait Encoder {
    fn encode(&self, value: &Encodable) -> Result<Vec<u8>>;
}
