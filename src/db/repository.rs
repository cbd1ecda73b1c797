//! Query API over the document store.
//!
//! Every operation recovers from store failures locally: the failure is
//! logged and the operation's empty value (`None`, empty list, empty
//! partition) is returned. Not-found is never an error.

use std::sync::Arc;

use rand::seq::SliceRandom;
use serde_json::Value;

use super::mapping::{self, collections, keys};
use super::{Document, DocumentStore, Query, StoreError};
use crate::models::{
    Battalion, Inventory, Location, Medal, Posting, Soldier, SoldierStatus, Visited, War,
    WarPartition, Weapon,
};

/// Number of unrelated visits returned when a soldier has none recorded.
pub const VISIT_SAMPLE_SIZE: usize = 2;

/// Default bound for [`Repository::list_soldiers`].
pub const DEFAULT_SOLDIER_LIST_LIMIT: usize = 20;

/// Encodings tried, in order, when looking a soldier up by id.
///
/// Write paths have stored the id as an integer, as a JSON double and as
/// text; typed equality means each has to be probed separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdEncoding {
    Integer,
    Native,
    Text,
}

impl IdEncoding {
    pub const PROBE_ORDER: [IdEncoding; 3] =
        [IdEncoding::Integer, IdEncoding::Native, IdEncoding::Text];

    pub fn encode(self, id: i64) -> Value {
        match self {
            IdEncoding::Integer => Value::from(id),
            IdEncoding::Native => Value::from(id as f64),
            IdEncoding::Text => Value::from(id.to_string()),
        }
    }
}

/// Stateless facade over a [`DocumentStore`].
///
/// Cheap to clone; every clone shares the same store.
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn DocumentStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    // ==================== SOLDIER OPERATIONS ====================

    /// Find a soldier by id, probing each [`IdEncoding`] in order.
    pub async fn find_soldier_by_id(&self, id: i64) -> Option<Soldier> {
        recover("find_soldier_by_id", self.try_find_soldier_by_id(id).await)
    }

    async fn try_find_soldier_by_id(&self, id: i64) -> Result<Option<Soldier>, StoreError> {
        for encoding in IdEncoding::PROBE_ORDER {
            let query = Query::collection(collections::SOLDIER)
                .where_eq(keys::SOLDIER_ID, encoding.encode(id));
            let docs = self.fetch(&query).await?;
            if !docs.is_empty() {
                tracing::debug!(id, ?encoding, "Soldier matched");
                return Ok(mapping::map_first(
                    collections::SOLDIER,
                    &docs,
                    mapping::soldier_from_document,
                ));
            }
        }
        tracing::debug!(id, "No soldier found");
        Ok(None)
    }

    /// List at most `limit` soldiers in retrieval order.
    pub async fn list_soldiers(&self, limit: usize) -> Vec<Soldier> {
        let query = Query::collection(collections::SOLDIER).limit(limit);
        recover("list_soldiers", self.fetch_all(&query, mapping::soldier_from_document).await)
    }

    /// Case-insensitive substring match on soldier names.
    ///
    /// The store has no substring predicate, so this scans the whole soldier
    /// collection on every call: O(collection size).
    pub async fn search_soldiers_by_name_prefix(&self, fragment: &str) -> Vec<Soldier> {
        let needle = fragment.to_lowercase();
        let query = Query::collection(collections::SOLDIER);
        let soldiers = recover(
            "search_soldiers_by_name_prefix",
            self.fetch_all(&query, mapping::soldier_from_document).await,
        );
        soldiers
            .into_iter()
            .filter(|soldier| soldier.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub async fn find_status_for_soldier(&self, id: i64) -> Option<SoldierStatus> {
        recover(
            "find_status_for_soldier",
            self.try_find_status_for_soldier(id).await,
        )
    }

    async fn try_find_status_for_soldier(
        &self,
        id: i64,
    ) -> Result<Option<SoldierStatus>, StoreError> {
        let docs = self
            .probe(collections::SOLDIER_STATUS, keys::STATUS_SOLDIER, id)
            .await?;
        Ok(mapping::map_first(
            collections::SOLDIER_STATUS,
            &docs,
            mapping::status_from_document,
        ))
    }

    /// Postings linked to a soldier under whichever link field the store used.
    pub async fn find_postings_for_soldier(&self, id: i64) -> Vec<Posting> {
        recover(
            "find_postings_for_soldier",
            self.try_find_postings_for_soldier(id).await,
        )
    }

    async fn try_find_postings_for_soldier(&self, id: i64) -> Result<Vec<Posting>, StoreError> {
        let docs = self
            .probe(collections::POSTING, keys::POSTING_SOLDIER, id)
            .await?;
        Ok(mapping::map_all(
            collections::POSTING,
            &docs,
            mapping::posting_from_document,
        ))
    }

    /// Visits recorded for a soldier.
    ///
    /// When the soldier has none, up to [`VISIT_SAMPLE_SIZE`] visits drawn at
    /// random from the whole collection are returned instead.
    pub async fn find_visits_for_soldier(&self, id: i64) -> Vec<Visited> {
        recover(
            "find_visits_for_soldier",
            self.try_find_visits_for_soldier(id).await,
        )
    }

    async fn try_find_visits_for_soldier(&self, id: i64) -> Result<Vec<Visited>, StoreError> {
        let query = Query::collection(collections::VISITED).where_eq(keys::VISIT_SOLDIER, id);
        let visits = self.fetch_all(&query, mapping::visit_from_document).await?;
        if !visits.is_empty() {
            return Ok(visits);
        }

        let everything = self
            .fetch_all(
                &Query::collection(collections::VISITED),
                mapping::visit_from_document,
            )
            .await?;
        tracing::debug!(
            id,
            available = everything.len(),
            "No visits recorded, sampling from all visits"
        );
        Ok(sample(everything, VISIT_SAMPLE_SIZE))
    }

    // ==================== LOOKUP OPERATIONS ====================

    pub async fn find_location_by_pincode(&self, pincode: i64) -> Option<Location> {
        let query =
            Query::collection(collections::LOCATION).where_eq(keys::LOCATION_PINCODE, pincode);
        recover(
            "find_location_by_pincode",
            self.fetch_first(&query, mapping::location_from_document).await,
        )
    }

    /// Battalion commanded by the given captain.
    ///
    /// Battalions have no identifier of their own in the store; the captain's
    /// soldier id is the only key available.
    pub async fn find_battalion_by_captain_id(&self, captain_id: i64) -> Option<Battalion> {
        let query =
            Query::collection(collections::BATTALION).where_eq(keys::BATTALION_CAPTAIN, captain_id);
        recover(
            "find_battalion_by_captain_id",
            self.fetch_first(&query, mapping::battalion_from_document).await,
        )
    }

    pub async fn list_battalions(&self) -> Vec<Battalion> {
        let query = Query::collection(collections::BATTALION);
        recover(
            "list_battalions",
            self.fetch_all(&query, mapping::battalion_from_document).await,
        )
    }

    pub async fn find_weapon_by_id(&self, weapon_id: i64) -> Option<Weapon> {
        let query = Query::collection(collections::WEAPON).where_eq(keys::WEAPON_ID, weapon_id);
        recover(
            "find_weapon_by_id",
            self.fetch_first(&query, mapping::weapon_from_document).await,
        )
    }

    pub async fn find_inventory_by_id(&self, id: i64) -> Option<Inventory> {
        let query = Query::collection(collections::INVENTORY).where_eq(keys::INVENTORY_ID, id);
        recover(
            "find_inventory_by_id",
            self.fetch_first(&query, mapping::inventory_from_document).await,
        )
    }

    pub async fn find_war_by_date(&self, date: &str) -> Option<War> {
        let query = Query::collection(collections::WAR).where_eq(keys::WAR_DATE, date);
        recover(
            "find_war_by_date",
            self.fetch_first(&query, mapping::war_from_document).await,
        )
    }

    pub async fn find_medal_by_name(&self, name: &str) -> Option<Medal> {
        let query = Query::collection(collections::MEDAL).where_eq(keys::MEDAL_NAME, name);
        recover(
            "find_medal_by_name",
            self.fetch_first(&query, mapping::medal_from_document).await,
        )
    }

    /// All wars, split into past and ongoing in retrieval order.
    pub async fn list_wars_partitioned(&self) -> WarPartition {
        let query = Query::collection(collections::WAR);
        let wars = self.fetch_all(&query, mapping::war_from_document).await;
        recover("list_wars_partitioned", wars.map(WarPartition::from_wars))
    }

    // ==================== STORE ACCESS ====================

    async fn fetch(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        let docs = self.store.query(query).await?;
        tracing::debug!(
            collection = %query.collection,
            filter = ?query.filter,
            matched = docs.len(),
            "Query executed"
        );
        Ok(docs)
    }

    async fn fetch_all<T>(
        &self,
        query: &Query,
        map: fn(&Document) -> Result<T, super::MappingError>,
    ) -> Result<Vec<T>, StoreError> {
        let docs = self.fetch(query).await?;
        Ok(mapping::map_all(&query.collection, &docs, map))
    }

    async fn fetch_first<T>(
        &self,
        query: &Query,
        map: fn(&Document) -> Result<T, super::MappingError>,
    ) -> Result<Option<T>, StoreError> {
        let docs = self.fetch(query).await?;
        Ok(mapping::map_first(&query.collection, &docs, map))
    }

    /// Query each candidate link field in turn; the first non-empty result
    /// set is returned as-is and later fields are not consulted.
    async fn probe(
        &self,
        collection: &str,
        fields: &[&str],
        id: i64,
    ) -> Result<Vec<Document>, StoreError> {
        for field in fields {
            let docs = self
                .fetch(&Query::collection(collection).where_eq(field, id))
                .await?;
            if !docs.is_empty() {
                tracing::debug!(collection, field, id, "Link field matched");
                return Ok(docs);
            }
        }
        Ok(Vec::new())
    }
}

/// Collapse a store failure into the operation's empty value.
fn recover<T: Default>(operation: &str, result: Result<T, StoreError>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(operation, "Store failure, returning empty result: {}", e);
        T::default()
    })
}

/// Up to `size` items in random order.
pub fn sample<T>(mut items: Vec<T>, size: usize) -> Vec<T> {
    items.shuffle(&mut rand::rng());
    items.truncate(size);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDocumentStore;
    use crate::models::WarStatus;
    use serde_json::json;

    async fn repo_with(store: MemoryDocumentStore) -> (Repository, Arc<MemoryDocumentStore>) {
        let store = Arc::new(store);
        (Repository::new(store.clone()), store)
    }

    async fn seeded(collection: &str, bodies: Vec<Value>) -> (Repository, Arc<MemoryDocumentStore>) {
        let store = MemoryDocumentStore::new();
        store.insert_all(collection, bodies).await;
        repo_with(store).await
    }

    #[test]
    fn test_id_encodings() {
        assert_eq!(IdEncoding::Integer.encode(7), json!(7));
        assert_eq!(IdEncoding::Native.encode(7), json!(7.0));
        assert_eq!(IdEncoding::Text.encode(7), json!("7"));
    }

    #[test]
    fn test_sample_bounds() {
        assert_eq!(sample(vec![1, 2, 3, 4], 2).len(), 2);
        assert_eq!(sample(vec![1], 2), vec![1]);
        assert!(sample(Vec::<i32>::new(), 2).is_empty());
    }

    #[tokio::test]
    async fn test_find_soldier_by_integer_id() {
        let (repo, _) = seeded(
            collections::SOLDIER,
            vec![json!({"id": 1, "name": "Arun"}), json!({"id": 2, "name": "Ravi"})],
        )
        .await;
        let soldier = repo.find_soldier_by_id(2).await.unwrap();
        assert_eq!(soldier.name, "Ravi");
    }

    #[tokio::test]
    async fn test_find_soldier_same_record_for_every_representation() {
        for stored_id in [json!(42), json!(42.0), json!("42")] {
            let (repo, _) = seeded(
                collections::SOLDIER,
                vec![json!({"id": stored_id, "name": "Ramesh", "rank": "Major"})],
            )
            .await;
            let soldier = repo.find_soldier_by_id(42).await.unwrap();
            assert_eq!(soldier.id, 42);
            assert_eq!(soldier.name, "Ramesh");
            assert_eq!(soldier.rank, "Major");
        }
    }

    #[tokio::test]
    async fn test_find_soldier_text_id_probed_last() {
        let (repo, store) = seeded(collections::SOLDIER, vec![json!({"id": "5", "name": "Text"})]).await;
        assert_eq!(repo.find_soldier_by_id(5).await.unwrap().name, "Text");

        let probed: Vec<Value> = store
            .queries()
            .await
            .into_iter()
            .filter_map(|q| q.filter.map(|f| f.value))
            .collect();
        assert_eq!(probed, vec![json!(5), json!(5.0), json!("5")]);
    }

    #[tokio::test]
    async fn test_find_soldier_not_found_is_none() {
        let (repo, _) = seeded(collections::SOLDIER, vec![json!({"id": 1})]).await;
        assert!(repo.find_soldier_by_id(99).await.is_none());
    }

    #[tokio::test]
    async fn test_find_soldier_missing_fields_default() {
        let (repo, _) = seeded(collections::SOLDIER, vec![json!({"id": 3})]).await;
        let soldier = repo.find_soldier_by_id(3).await.unwrap();
        assert_eq!(
            soldier,
            Soldier {
                id: 3,
                ..Soldier::default()
            }
        );
    }

    #[tokio::test]
    async fn test_postings_first_non_empty_link_field_wins() {
        let (repo, store) = seeded(
            collections::POSTING,
            vec![
                json!({"soldier_id": 8, "posting_id": 1, "date": "1 Jan 2001"}),
                json!({"soldId": 8, "posting_id": 2, "date": "1 Jan 2002"}),
                json!({"soldier_id": 8, "posting_id": 3, "date": "1 Jan 2003"}),
            ],
        )
        .await;

        let postings = repo.find_postings_for_soldier(8).await;
        let ids: Vec<_> = postings.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);

        // "id" probed first, "soldier_id" matched, "soldId" never queried
        let fields: Vec<String> = store
            .queries()
            .await
            .into_iter()
            .filter_map(|q| q.filter.map(|f| f.field))
            .collect();
        assert_eq!(fields, vec!["id", "soldier_id"]);
    }

    #[tokio::test]
    async fn test_postings_none_found() {
        let (repo, _) = seeded(collections::POSTING, vec![json!({"id": 1})]).await;
        assert!(repo.find_postings_for_soldier(2).await.is_empty());
    }

    #[tokio::test]
    async fn test_status_probes_upper_case_id_first() {
        let (repo, _) = seeded(
            collections::SOLDIER_STATUS,
            vec![
                json!({"id": 4, "Alive": 0, "Pincode": 1}),
                json!({"ID": 4, "Alive": 1, "Pincode": 2}),
            ],
        )
        .await;
        let status = repo.find_status_for_soldier(4).await.unwrap();
        assert!(status.alive);
        assert_eq!(status.pincode, 2);
    }

    #[tokio::test]
    async fn test_visits_for_soldier_with_records() {
        let (repo, _) = seeded(
            collections::VISITED,
            vec![
                json!({"sold_id": 1, "reason": "Leave", "pincode": 10}),
                json!({"sold_id": 2, "reason": "Duty", "pincode": 20}),
                json!({"sold_id": 1, "reason": "Training", "pincode": 30}),
            ],
        )
        .await;
        let reasons: Vec<_> = repo
            .find_visits_for_soldier(1)
            .await
            .into_iter()
            .map(|v| v.reason)
            .collect();
        assert_eq!(reasons, vec!["Leave", "Training"]);
    }

    #[tokio::test]
    async fn test_visits_fallback_samples_two() {
        let (repo, _) = seeded(
            collections::VISITED,
            (0..5).map(|i| json!({"sold_id": 100 + i})).collect(),
        )
        .await;
        let visits = repo.find_visits_for_soldier(1).await;
        assert_eq!(visits.len(), VISIT_SAMPLE_SIZE);
        assert!(visits.iter().all(|v| v.soldier_id >= 100));
    }

    #[tokio::test]
    async fn test_visits_fallback_with_small_collection() {
        let (repo, _) = seeded(collections::VISITED, vec![json!({"sold_id": 100})]).await;
        assert_eq!(repo.find_visits_for_soldier(1).await.len(), 1);

        let (empty, _) = repo_with(MemoryDocumentStore::new()).await;
        assert!(empty.find_visits_for_soldier(1).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let (repo, _) = seeded(
            collections::SOLDIER,
            vec![
                json!({"name": "Ramesh"}),
                json!({"name": "Shyam"}),
                json!({"Name": "Sundaram"}),
                json!({"name": "RAM KUMAR"}),
            ],
        )
        .await;
        let names: Vec<_> = repo
            .search_soldiers_by_name_prefix("ram")
            .await
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Ramesh", "Sundaram", "RAM KUMAR"]);
    }

    #[tokio::test]
    async fn test_list_soldiers_is_bounded() {
        let (repo, _) = seeded(
            collections::SOLDIER,
            (0..30).map(|i| json!({"id": i})).collect(),
        )
        .await;
        assert_eq!(repo.list_soldiers(DEFAULT_SOLDIER_LIST_LIMIT).await.len(), 20);
        assert_eq!(repo.list_soldiers(5).await.len(), 5);
    }

    #[tokio::test]
    async fn test_list_wars_partitioned() {
        let (repo, _) = seeded(
            collections::WAR,
            [0, 1, 0, 1, 1]
                .iter()
                .enumerate()
                .map(|(i, s)| json!({"DateNo": format!("war-{}", i), "Status": s}))
                .collect(),
        )
        .await;
        let partition = repo.list_wars_partitioned().await;
        assert_eq!(partition.past_wars.len(), 2);
        assert_eq!(partition.ongoing_wars.len(), 3);
        assert_eq!(partition.past_wars[0].date_no, "war-0");
        assert_eq!(partition.past_wars[1].date_no, "war-2");
        assert!(partition
            .ongoing_wars
            .iter()
            .all(|w| w.status == WarStatus::Ongoing));
    }

    #[tokio::test]
    async fn test_single_key_lookups() {
        let store = MemoryDocumentStore::new();
        store
            .insert_all(collections::LOCATION, vec![json!({"pincode": 560001, "State": "Karnataka"})])
            .await;
        store
            .insert_all(collections::BATTALION, vec![json!({"captain_id": 9, "battalion_name": "Gorkha"})])
            .await;
        store
            .insert_all(collections::WEAPON, vec![json!({"weapon_id": 3, "name": "Pinaka"})])
            .await;
        store
            .insert_all(collections::INVENTORY, vec![json!({"ID": 11, "weapon_id": 3})])
            .await;
        store
            .insert_all(collections::WAR, vec![json!({"DateNo": "1999-05-03", "Status": 0})])
            .await;
        store
            .insert_all(collections::MEDAL, vec![json!({"Name": "Ashoka Chakra"})])
            .await;
        let (repo, _) = repo_with(store).await;

        assert_eq!(repo.find_location_by_pincode(560001).await.unwrap().state, "Karnataka");
        assert_eq!(repo.find_battalion_by_captain_id(9).await.unwrap().name, "Gorkha");
        assert_eq!(repo.find_weapon_by_id(3).await.unwrap().name, "Pinaka");
        assert_eq!(repo.find_inventory_by_id(11).await.unwrap().weapon_id, 3);
        assert_eq!(repo.find_war_by_date("1999-05-03").await.unwrap().status, WarStatus::Past);
        assert_eq!(repo.find_medal_by_name("Ashoka Chakra").await.unwrap().name, "Ashoka Chakra");
        assert_eq!(repo.list_battalions().await.len(), 1);

        assert!(repo.find_location_by_pincode(1).await.is_none());
        assert!(repo.find_battalion_by_captain_id(1).await.is_none());
        assert!(repo.find_weapon_by_id(1).await.is_none());
        assert!(repo.find_inventory_by_id(1).await.is_none());
        assert!(repo.find_war_by_date("never").await.is_none());
        assert!(repo.find_medal_by_name("None").await.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_yields_empty_values() {
        let store = MemoryDocumentStore::new();
        store.insert_all(collections::VISITED, vec![json!({"sold_id": 1})]).await;
        for collection in [
            collections::SOLDIER,
            collections::SOLDIER_STATUS,
            collections::POSTING,
            collections::VISITED,
            collections::LOCATION,
            collections::BATTALION,
            collections::WEAPON,
            collections::INVENTORY,
            collections::WAR,
            collections::MEDAL,
        ] {
            store.fail_collection(collection).await;
        }
        let (repo, _) = repo_with(store).await;

        assert!(repo.find_soldier_by_id(1).await.is_none());
        assert!(repo.list_soldiers(10).await.is_empty());
        assert!(repo.search_soldiers_by_name_prefix("a").await.is_empty());
        assert!(repo.find_status_for_soldier(1).await.is_none());
        assert!(repo.find_postings_for_soldier(1).await.is_empty());
        assert!(repo.find_visits_for_soldier(1).await.is_empty());
        assert!(repo.find_location_by_pincode(1).await.is_none());
        assert!(repo.find_battalion_by_captain_id(1).await.is_none());
        assert!(repo.list_battalions().await.is_empty());
        assert!(repo.find_weapon_by_id(1).await.is_none());
        assert!(repo.find_inventory_by_id(1).await.is_none());
        assert!(repo.find_war_by_date("x").await.is_none());
        assert!(repo.find_medal_by_name("x").await.is_none());
        assert_eq!(repo.list_wars_partitioned().await, WarPartition::default());
    }

    #[tokio::test]
    async fn test_malformed_document_dropped_from_batch() {
        let (repo, _) = seeded(
            collections::WAR,
            vec![
                json!({"DateNo": "a", "Status": 0}),
                json!(["broken"]),
                json!({"DateNo": "b", "Status": 1}),
            ],
        )
        .await;
        let partition = repo.list_wars_partitioned().await;
        assert_eq!(partition.past_wars.len(), 1);
        assert_eq!(partition.ongoing_wars.len(), 1);
    }
}
