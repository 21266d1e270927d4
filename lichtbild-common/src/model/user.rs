use crate::model::Id;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct UserMarker;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct User {
    pub id: Id<UserMarker>,
    pub name: String,
    pub image_url: Option<String>,
}

impl User {
    #[must_use]
    pub fn is(&self, id: &Id<UserMarker>) -> bool {
        self.id == *id
    }
}
