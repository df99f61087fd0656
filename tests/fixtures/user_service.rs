use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

pub struct UserController;

#[controller]
#[route("/users")]
impl UserController {
    #[get("/{id}")]
    fn get_user(#[path_variable] id: u64) -> User {
        todo!()
    }

    #[get]
    fn list_users(
        #[query_param] page: u32,
        #[query_param(name = "size", required = false)] page_size: u32,
    ) -> Vec<User> {
        todo!()
    }

    #[post]
    fn create_user(#[request_body] user: NewUser) -> User {
        todo!()
    }

    #[delete("/{id}")]
    fn delete_user(#[path_variable] id: u64) {}

    #[route("/search", method = "GET")]
    fn search_users(#[query_param] q: String) -> Vec<User> {
        todo!()
    }

    fn audit(&self) -> bool {
        false
    }
}
