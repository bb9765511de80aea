use crate::modules::class::model::Class;
use crate::store::StoreHandle;

pub struct ClassCrud {
    store: StoreHandle,
}

impl ClassCrud {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    pub async fn create(&self, class: Class) {
        self.store.classes.insert(class).await;
    }

    pub async fn get(&self, id: &str) -> Option<Class> {
        self.store.classes.get(id).await
    }

    pub async fn find_by_faculty(&self, faculty_id: &str) -> Vec<Class> {
        let mut classes = self
            .store
            .classes
            .find_all(|c| c.faculty_id == faculty_id)
            .await;
        classes.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        classes
    }
}
