pub use self::simple::*;

mod simple;

pub static ROOT_FORM: &'static str = "ROOT";
pub static ROOT_POSTAG: &'static str = "ROOT";

pub trait Tokenized {
    fn id(&self) -> usize;
    fn form(&self) -> &str;
    fn postag(&self) -> &str;
}

impl<'a, T: Tokenized> Tokenized for &'a T {
    fn id(&self) -> usize {
        (**self).id()
    }

    fn form(&self) -> &str {
        (**self).form()
    }

    fn postag(&self) -> &str {
        (**self).postag()
    }
}
