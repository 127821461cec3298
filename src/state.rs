use crate::admission::AdmissionMiddleware;
use crate::store::UserStore;
// app's shared state

pub struct AppState {
    pub users: UserStore,
    pub admission: AdmissionMiddleware, // shared limiter, routes opt in
}

impl AppState {
    pub fn new(admission: AdmissionMiddleware) -> Self {
        Self {
            users: UserStore::new(),
            admission,
        }
    }
}
