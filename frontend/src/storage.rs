use leptos::prelude::window;
use web_sys::Storage;

fn local_storage() -> Option<Storage> {
    match window().local_storage() {
        Ok(storage) => storage,
        Err(e) => {
            log::warn!("localStorage unavailable: {e:?}");
            None
        }
    }
}

pub fn load(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

pub fn store(key: &str, value: &str) {
    let Some(storage) = local_storage() else { return };
    if let Err(e) = storage.set_item(key, value) {
        log::error!("failed to persist {key}: {e:?}");
    }
}
