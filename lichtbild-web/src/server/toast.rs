use lichtbild_client::ui::Toast;
use tokio::sync::Mutex;

/// Toasts waiting for the next rendered page, each shown once.
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: Mutex<Vec<Toast>>,
}

impl ToastQueue {
    pub async fn push_all(&self, toasts: impl IntoIterator<Item = Toast>) {
        self.pending.lock().await.extend(toasts);
    }

    pub async fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.pending.lock().await)
    }
}

#[cfg(test)]
mod tests {
    use crate::server::toast::ToastQueue;
    use lichtbild_client::ui::Toast;

    #[tokio::test]
    async fn drained_once() {
        let queue = ToastQueue::default();
        queue.push_all([Toast::new("one")]).await;
        queue.push_all([Toast::new("two")]).await;

        assert_eq!(queue.drain().await, [Toast::new("one"), Toast::new("two")]);
        assert!(queue.drain().await.is_empty());
    }
}
