use crate::tree::Entity;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Ent ({:?}) does not have a node in the tree.", _0)]
    NonNodeFound(Entity),
    #[fail(display = "Node can not set self as parent.")]
    CanNotAttachSelfAsParent,
    #[fail(display = "Position ({:?}) is not a child of ({:?}).", _0, _1)]
    ForeignPosition(Entity, Entity),
}

pub type Result<T> = ::std::result::Result<T, Error>;
