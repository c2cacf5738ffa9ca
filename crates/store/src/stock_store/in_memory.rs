use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use almacen_stock::{decide, Movement, MovementDecision, MovementResult, StockItem, StockItemId};

use super::r#trait::StockStore;
use crate::error::StoreError;

/// In-memory stock store.
///
/// Intended for tests/dev. The write lock is held across the whole
/// read-decide-write sequence, which serializes movements on *all* articulos
/// rather than per row; that is coarser than the SQL store but gives the
/// same no-lost-update guarantee.
#[derive(Debug, Default)]
pub struct InMemoryStockStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    /// articulo -> (id, cantidad). BTreeMap keeps listing order for free.
    rows: BTreeMap<String, (StockItemId, i64)>,
    next_id: i64,
}

impl InMemoryStockStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StockStore for InMemoryStockStore {
    async fn list(&self) -> Result<Vec<StockItem>, StoreError> {
        let inner = self.inner.read().expect("stock store lock poisoned");
        Ok(inner
            .rows
            .iter()
            .map(|(articulo, (id, cantidad))| StockItem {
                id: *id,
                articulo: articulo.clone(),
                cantidad: *cantidad,
            })
            .collect())
    }

    async fn apply(&self, movement: Movement) -> Result<MovementResult, StoreError> {
        let mut inner = self.inner.write().expect("stock store lock poisoned");

        let current = inner
            .rows
            .get(movement.articulo())
            .map(|(id, cantidad)| StockItem {
                id: *id,
                articulo: movement.articulo().to_string(),
                cantidad: *cantidad,
            });

        match decide(current.as_ref(), &movement)? {
            MovementDecision::Create { cantidad } => {
                inner.next_id += 1;
                let id = StockItemId(inner.next_id);
                inner
                    .rows
                    .insert(movement.articulo().to_string(), (id, cantidad));
                Ok(MovementResult::Created {
                    id,
                    articulo: movement.articulo().to_string(),
                    cantidad,
                })
            }
            MovementDecision::Update {
                id,
                previous,
                cantidad,
            } => {
                inner
                    .rows
                    .insert(movement.articulo().to_string(), (id, cantidad));
                Ok(MovementResult::Updated {
                    id,
                    articulo: movement.articulo().to_string(),
                    previous,
                    delta: movement.delta(),
                    cantidad,
                })
            }
            MovementDecision::Delete { previous, .. } => {
                inner.rows.remove(movement.articulo());
                Ok(MovementResult::Deleted {
                    articulo: movement.articulo().to_string(),
                    previous,
                    delta: movement.delta(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use almacen_core::DomainError;

    use super::*;

    fn movement(articulo: &str, delta: i64) -> Movement {
        Movement::new(articulo, delta).unwrap()
    }

    #[tokio::test]
    async fn full_article_lifecycle() {
        let store = InMemoryStockStore::new();

        let created = store.apply(movement("Tornillo", 10)).await.unwrap();
        let MovementResult::Created { id, cantidad, .. } = created else {
            panic!("expected Created, got {created:?}");
        };
        assert_eq!(cantidad, 10);

        let updated = store.apply(movement("Tornillo", -3)).await.unwrap();
        assert_eq!(
            updated,
            MovementResult::Updated {
                id,
                articulo: "Tornillo".to_string(),
                previous: 10,
                delta: -3,
                cantidad: 7,
            }
        );

        let deleted = store.apply(movement("Tornillo", -7)).await.unwrap();
        assert_eq!(
            deleted,
            MovementResult::Deleted {
                articulo: "Tornillo".to_string(),
                previous: 7,
                delta: -7,
            }
        );

        // Article is gone: a negative delta is now an invalid create.
        let err = store.apply(movement("Tornillo", -1)).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(DomainError::InvalidOperation(_))
        ));

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejected_movement_leaves_quantity_unchanged() {
        let store = InMemoryStockStore::new();
        store.apply(movement("Tuerca", 5)).await.unwrap();

        let err = store.apply(movement("Tuerca", -6)).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(DomainError::NegativeStock {
                current: 5,
                attempted: -6,
            })
        ));

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].cantidad, 5);
    }

    #[tokio::test]
    async fn listing_is_ordered_by_articulo() {
        let store = InMemoryStockStore::new();
        for articulo in ["Tuerca", "Arandela", "Tornillo"] {
            store.apply(movement(articulo, 1)).await.unwrap();
        }

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.articulo)
            .collect();
        assert_eq!(names, ["Arandela", "Tornillo", "Tuerca"]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryStockStore::new();

        let MovementResult::Created { id: first, .. } =
            store.apply(movement("Tornillo", 1)).await.unwrap()
        else {
            panic!("expected Created");
        };
        store.apply(movement("Tornillo", -1)).await.unwrap();

        let MovementResult::Created { id: second, .. } =
            store.apply(movement("Tornillo", 1)).await.unwrap()
        else {
            panic!("expected Created");
        };
        assert_ne!(first, second);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_movements_on_one_articulo_lose_nothing() {
        let store = Arc::new(InMemoryStockStore::new());
        store.apply(movement("Tornillo", 100)).await.unwrap();

        // 50 decrements and 50 increments racing on the same row. Every one
        // is individually valid against any serialization, so the final
        // quantity must be exactly the initial value.
        let mut handles = Vec::new();
        for i in 0..100 {
            let store = Arc::clone(&store);
            let delta = if i % 2 == 0 { -1 } else { 1 };
            handles.push(tokio::spawn(async move {
                store.apply(movement("Tornillo", delta)).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].cantidad, 100);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_movements_on_distinct_articulos_all_land() {
        let store = Arc::new(InMemoryStockStore::new());

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let articulo = format!("Articulo-{i:02}");
                for _ in 0..10 {
                    store.apply(movement(&articulo, 1)).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 20);
        assert!(listed.iter().all(|item| item.cantidad == 10));
    }
}
