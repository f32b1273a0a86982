use const_format::concatcp;

use crate::api::API_BASE_PATH;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Object {
    Ping,
    Users,
    UserExercises,
    UserLogs,
}

impl Object {
    pub const fn path(&self) -> &'static str {
        use Object::*;
        match self {
            Ping => concatcp!(API_BASE_PATH, "ping"),
            Users => concatcp!(API_BASE_PATH, "users"),
            UserExercises => concatcp!(API_BASE_PATH, "users/:id/exercises"),
            UserLogs => concatcp!(API_BASE_PATH, "users/:id/logs"),
        }
    }

    /// The path with the `:id` segment filled in
    pub fn id_path<T: ToString>(&self, id: T) -> String {
        self.path().replace(":id", &id.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::Object;

    #[test]
    fn test_paths() {
        assert_eq!(Object::Users.path(), "/api/users");
        assert_eq!(Object::UserLogs.id_path("abc"), "/api/users/abc/logs");
        assert_eq!(Object::UserExercises.id_path(7), "/api/users/7/exercises");
    }
}
