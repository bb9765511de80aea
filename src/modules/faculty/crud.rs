use crate::modules::faculty::model::Faculty;
use crate::store::StoreHandle;

pub struct FacultyCrud {
    store: StoreHandle,
}

impl FacultyCrud {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    pub async fn create(&self, faculty: Faculty) {
        self.store.faculty.insert(faculty).await;
    }

    pub async fn find_by_auth_id(&self, auth_id: &str) -> Option<Faculty> {
        self.store.faculty.find(|f| f.auth_id == auth_id).await
    }
}
