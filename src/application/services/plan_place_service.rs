//! Plan Place Service
//!
//! Places attached to a plan, organised as a hierarchy. Only the plan owner
//! may read or change them.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::place_service::find_or_create_place;
use super::plan_service::find_managed_plan;
use crate::domain::services::{PlaceHierarchy, PlanPlaceNode, MAX_DEPTH};
use crate::domain::{
    NewPlace, PlaceRepository, PlanPlace, PlanPlaceRepository, PlanRepository, ReferenceUpdate,
};
use crate::shared::error::AppError;

/// Plan place service trait
#[async_trait]
pub trait PlanPlaceService: Send + Sync {
    /// Flat list ordered by level, then creation time.
    async fn list(&self, plan_id: Uuid, user_id: Uuid) -> Result<Vec<PlanPlace>, PlanPlaceError>;

    /// The same entries nested under their parents.
    async fn tree(&self, plan_id: Uuid, user_id: Uuid)
        -> Result<Vec<PlanPlaceNode>, PlanPlaceError>;

    async fn get(&self, plan_id: Uuid, id: Uuid, user_id: Uuid)
        -> Result<PlanPlace, PlanPlaceError>;

    async fn create(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
        request: CreatePlanPlaceDto,
    ) -> Result<PlanPlace, PlanPlaceError>;

    async fn update(
        &self,
        plan_id: Uuid,
        id: Uuid,
        user_id: Uuid,
        request: UpdatePlanPlaceDto,
    ) -> Result<PlanPlace, PlanPlaceError>;

    /// Soft-delete an entry and everything below it.
    async fn delete(&self, plan_id: Uuid, id: Uuid, user_id: Uuid) -> Result<(), PlanPlaceError>;
}

/// Attach a place to a plan, either an existing one or a new one.
#[derive(Debug, Clone, Default)]
pub struct CreatePlanPlaceDto {
    pub place_id: Option<Uuid>,
    pub place: Option<NewPlace>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub level: i32,
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct UpdatePlanPlaceDto {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub level: Option<i32>,
    pub parent: ReferenceUpdate,
}

impl Default for UpdatePlanPlaceDto {
    fn default() -> Self {
        Self {
            name: None,
            kind: None,
            level: None,
            parent: ReferenceUpdate::Keep,
        }
    }
}

/// Plan place service errors
#[derive(Debug, thiserror::Error)]
pub enum PlanPlaceError {
    #[error("You do not have access to this plan")]
    Forbidden,

    #[error("Plan place not found")]
    NotFound,

    #[error("Exactly one of placesId or place must be provided")]
    AmbiguousPlace,

    #[error("Place with ID {0} does not exist")]
    PlaceNotFound(Uuid),

    #[error("Parent place with ID {0} does not exist in this plan")]
    ParentNotFound(Uuid),

    #[error("A place cannot be its own parent")]
    SelfParent,

    #[error("A place cannot be moved under one of its descendants")]
    Cycle,

    #[error("Level must be a non-negative number")]
    InvalidLevel,

    #[error("Places can be nested at most {} levels deep", MAX_DEPTH)]
    TooDeep,

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<PlanPlaceError> for AppError {
    fn from(err: PlanPlaceError) -> Self {
        match err {
            PlanPlaceError::Forbidden => AppError::Forbidden(err.to_string()),
            PlanPlaceError::NotFound => AppError::NotFound(err.to_string()),
            PlanPlaceError::Repository(e) => e,
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

/// PlanPlaceService implementation
pub struct PlanPlaceServiceImpl<P, E, R>
where
    P: PlanRepository,
    E: PlanPlaceRepository,
    R: PlaceRepository,
{
    plan_repo: Arc<P>,
    entry_repo: Arc<E>,
    place_repo: Arc<R>,
}

impl<P, E, R> PlanPlaceServiceImpl<P, E, R>
where
    P: PlanRepository,
    E: PlanPlaceRepository,
    R: PlaceRepository,
{
    pub fn new(plan_repo: Arc<P>, entry_repo: Arc<E>, place_repo: Arc<R>) -> Self {
        Self {
            plan_repo,
            entry_repo,
            place_repo,
        }
    }

    async fn authorize(&self, plan_id: Uuid, user_id: Uuid) -> Result<(), PlanPlaceError> {
        find_managed_plan(&*self.plan_repo, plan_id, user_id)
            .await?
            .map(|_| ())
            .ok_or(PlanPlaceError::Forbidden)
    }

    async fn ensure_parent_in_plan(&self, plan_id: Uuid, parent_id: Uuid) -> Result<(), PlanPlaceError> {
        self.entry_repo
            .find_by_id(plan_id, parent_id)
            .await?
            .map(|_| ())
            .ok_or(PlanPlaceError::ParentNotFound(parent_id))
    }

    /// Resolve the place an entry points at.
    async fn resolve_place(&self, request: &mut CreatePlanPlaceDto) -> Result<Uuid, PlanPlaceError> {
        match (request.place_id, request.place.take()) {
            (Some(place_id), None) => self
                .place_repo
                .find_by_id(place_id)
                .await?
                .map(|place| place.id)
                .ok_or(PlanPlaceError::PlaceNotFound(place_id)),
            (None, Some(new_place)) => {
                let place = find_or_create_place(&*self.place_repo, new_place).await?;
                Ok(place.id)
            }
            _ => Err(PlanPlaceError::AmbiguousPlace),
        }
    }
}

#[async_trait]
impl<P, E, R> PlanPlaceService for PlanPlaceServiceImpl<P, E, R>
where
    P: PlanRepository + 'static,
    E: PlanPlaceRepository + 'static,
    R: PlaceRepository + 'static,
{
    async fn list(&self, plan_id: Uuid, user_id: Uuid) -> Result<Vec<PlanPlace>, PlanPlaceError> {
        self.authorize(plan_id, user_id).await?;
        Ok(self.entry_repo.list_by_plan(plan_id).await?)
    }

    async fn tree(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<PlanPlaceNode>, PlanPlaceError> {
        let entries = self.list(plan_id, user_id).await?;
        Ok(PlaceHierarchy::build_tree(entries))
    }

    async fn get(
        &self,
        plan_id: Uuid,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<PlanPlace, PlanPlaceError> {
        self.authorize(plan_id, user_id).await?;
        self.entry_repo
            .find_by_id(plan_id, id)
            .await?
            .ok_or(PlanPlaceError::NotFound)
    }

    async fn create(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
        mut request: CreatePlanPlaceDto,
    ) -> Result<PlanPlace, PlanPlaceError> {
        self.authorize(plan_id, user_id).await?;

        if request.level < 0 {
            return Err(PlanPlaceError::InvalidLevel);
        }
        if let Some(parent_id) = request.parent_id {
            self.ensure_parent_in_plan(plan_id, parent_id).await?;

            let entries = self.entry_repo.list_by_plan(plan_id).await?;
            if PlaceHierarchy::depth_of(&entries, parent_id) + 1 > MAX_DEPTH {
                return Err(PlanPlaceError::TooDeep);
            }
        }
        let place_id = self.resolve_place(&mut request).await?;

        let entry = PlanPlace::new(
            plan_id,
            place_id,
            request.name,
            request.kind,
            request.level,
            request.parent_id,
        );
        let created = self.entry_repo.create(&entry).await?;

        tracing::info!(%plan_id, plan_place_id = %created.id, %place_id, "Place attached to plan");
        Ok(created)
    }

    async fn update(
        &self,
        plan_id: Uuid,
        id: Uuid,
        user_id: Uuid,
        request: UpdatePlanPlaceDto,
    ) -> Result<PlanPlace, PlanPlaceError> {
        let mut entry = self.get(plan_id, id, user_id).await?;

        if let Some(parent_id) = request.parent.target() {
            if parent_id == entry.id {
                return Err(PlanPlaceError::SelfParent);
            }
            self.ensure_parent_in_plan(plan_id, parent_id).await?;

            let entries = self.entry_repo.list_by_plan(plan_id).await?;
            if PlaceHierarchy::is_in_subtree(&entries, entry.id, parent_id) {
                return Err(PlanPlaceError::Cycle);
            }
            let depth = PlaceHierarchy::depth_of(&entries, parent_id)
                + PlaceHierarchy::height_of(&entries, entry.id);
            if depth > MAX_DEPTH {
                return Err(PlanPlaceError::TooDeep);
            }
        }
        entry.parent_id = request.parent.apply(entry.parent_id);

        if let Some(level) = request.level {
            if level < 0 {
                return Err(PlanPlaceError::InvalidLevel);
            }
            entry.level = level;
        }
        if let Some(name) = request.name {
            entry.name = Some(name);
        }
        if let Some(kind) = request.kind {
            entry.kind = Some(kind);
        }
        entry.updated_at = Utc::now();

        self.entry_repo
            .update(&entry)
            .await?
            .ok_or(PlanPlaceError::NotFound)
    }

    async fn delete(&self, plan_id: Uuid, id: Uuid, user_id: Uuid) -> Result<(), PlanPlaceError> {
        self.authorize(plan_id, user_id).await?;

        let removed = self.entry_repo.soft_delete_subtree(plan_id, id).await?;
        if removed == 0 {
            return Err(PlanPlaceError::NotFound);
        }
        tracing::info!(%plan_id, plan_place_id = %id, removed, "Plan place subtree deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        MockPlaceRepository, MockPlanPlaceRepository, MockPlanRepository, Place, Plan,
    };
    use mockall::predicate::eq;

    type Service =
        PlanPlaceServiceImpl<MockPlanRepository, MockPlanPlaceRepository, MockPlaceRepository>;

    struct Fixture {
        owner: Uuid,
        plan_id: Uuid,
        plans: MockPlanRepository,
    }

    fn fixture() -> Fixture {
        let owner = Uuid::new_v4();
        let plan = Plan::new(owner, Some("Trip".into()), 1, false);
        let plan_id = plan.id;
        let mut plans = MockPlanRepository::new();
        plans
            .expect_find_by_id()
            .returning(move |_| Ok(Some(plan.clone())));
        Fixture {
            owner,
            plan_id,
            plans,
        }
    }

    fn service(plans: MockPlanRepository, entries: MockPlanPlaceRepository, places: MockPlaceRepository) -> Service {
        PlanPlaceServiceImpl::new(Arc::new(plans), Arc::new(entries), Arc::new(places))
    }

    fn entry(plan_id: Uuid, parent_id: Option<Uuid>) -> PlanPlace {
        PlanPlace::new(plan_id, Uuid::new_v4(), None, None, 0, parent_id)
    }

    fn chain(plan_id: Uuid, len: usize) -> Vec<PlanPlace> {
        let mut entries: Vec<PlanPlace> = Vec::with_capacity(len);
        for _ in 0..len {
            let parent = entries.last().map(|e| e.id);
            entries.push(entry(plan_id, parent));
        }
        entries
    }

    /// Entries repository serving `all` for lookups and listing.
    fn entries_of(all: Vec<PlanPlace>) -> MockPlanPlaceRepository {
        let lookup = all.clone();
        let mut entries = MockPlanPlaceRepository::new();
        entries
            .expect_find_by_id()
            .returning(move |_, id| Ok(lookup.iter().find(|e| e.id == id).cloned()));
        entries
            .expect_list_by_plan()
            .returning(move |_| Ok(all.clone()));
        entries
    }

    fn existing_place() -> MockPlaceRepository {
        let mut places = MockPlaceRepository::new();
        places.expect_find_by_id().returning(|id| {
            let mut place = Place::create(NewPlace {
                name: "Somewhere".into(),
                ..Default::default()
            });
            place.id = id;
            Ok(Some(place))
        });
        places
    }

    #[tokio::test]
    async fn create_below_deepest_allowed_entry_is_rejected() {
        let f = fixture();
        let all = chain(f.plan_id, MAX_DEPTH);
        let deepest = all[MAX_DEPTH - 1].id;
        let mut entries = entries_of(all);
        entries.expect_create().never();

        let result = service(f.plans, entries, existing_place())
            .create(
                f.plan_id,
                f.owner,
                CreatePlanPlaceDto {
                    place_id: Some(Uuid::new_v4()),
                    parent_id: Some(deepest),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(PlanPlaceError::TooDeep)));
        assert!(matches!(
            AppError::from(PlanPlaceError::TooDeep),
            AppError::BadRequest(_)
        ));
    }

    #[tokio::test]
    async fn create_at_max_depth_is_allowed() {
        let f = fixture();
        let all = chain(f.plan_id, MAX_DEPTH - 1);
        let deepest = all[MAX_DEPTH - 2].id;
        let mut entries = entries_of(all);
        entries.expect_create().returning(|e| Ok(e.clone()));

        let created = service(f.plans, entries, existing_place())
            .create(
                f.plan_id,
                f.owner,
                CreatePlanPlaceDto {
                    place_id: Some(Uuid::new_v4()),
                    parent_id: Some(deepest),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(created.parent_id, Some(deepest));
    }

    #[tokio::test]
    async fn moving_a_subtree_too_deep_is_rejected() {
        let f = fixture();
        // Two chains of 20: hanging one under the other needs 40 levels
        let mut all = chain(f.plan_id, 20);
        let target = all[19].id;
        let moved = chain(f.plan_id, 20);
        let moved_root = moved[0].id;
        all.extend(moved);
        let mut entries = entries_of(all);
        entries.expect_update().never();

        let result = service(f.plans, entries, MockPlaceRepository::new())
            .update(
                f.plan_id,
                moved_root,
                f.owner,
                UpdatePlanPlaceDto {
                    parent: ReferenceUpdate::Set(target),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(PlanPlaceError::TooDeep)));
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let f = fixture();
        let result = service(f.plans, MockPlanPlaceRepository::new(), MockPlaceRepository::new())
            .list(f.plan_id, Uuid::new_v4())
            .await;

        assert!(matches!(result, Err(PlanPlaceError::Forbidden)));
    }

    #[tokio::test]
    async fn missing_plan_is_forbidden() {
        let mut plans = MockPlanRepository::new();
        plans.expect_find_by_id().returning(|_| Ok(None));

        let result = service(plans, MockPlanPlaceRepository::new(), MockPlaceRepository::new())
            .list(Uuid::new_v4(), Uuid::new_v4())
            .await;

        assert!(matches!(result, Err(PlanPlaceError::Forbidden)));
    }

    #[tokio::test]
    async fn create_requires_exactly_one_place_source() {
        let f = fixture();
        let svc = service(f.plans, MockPlanPlaceRepository::new(), MockPlaceRepository::new());

        let neither = svc
            .create(f.plan_id, f.owner, CreatePlanPlaceDto::default())
            .await;
        assert!(matches!(neither, Err(PlanPlaceError::AmbiguousPlace)));

        let both = svc
            .create(
                f.plan_id,
                f.owner,
                CreatePlanPlaceDto {
                    place_id: Some(Uuid::new_v4()),
                    place: Some(NewPlace {
                        name: "x".into(),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(both, Err(PlanPlaceError::AmbiguousPlace)));
    }

    #[tokio::test]
    async fn create_with_existing_place() {
        let f = fixture();
        let place = Place::create(NewPlace {
            name: "Louvre".into(),
            ..Default::default()
        });
        let place_id = place.id;
        let plan_id = f.plan_id;

        let mut places = MockPlaceRepository::new();
        places
            .expect_find_by_id()
            .with(eq(place_id))
            .returning(move |_| Ok(Some(place.clone())));
        let mut entries = MockPlanPlaceRepository::new();
        entries
            .expect_create()
            .withf(move |e| e.plan_id == plan_id && e.place_id == place_id && e.level == 2)
            .returning(|e| Ok(e.clone()));

        let created = service(f.plans, entries, places)
            .create(
                f.plan_id,
                f.owner,
                CreatePlanPlaceDto {
                    place_id: Some(place_id),
                    kind: Some("place".into()),
                    level: 2,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(created.kind.as_deref(), Some("place"));
    }

    #[tokio::test]
    async fn create_with_unknown_place_is_bad_request() {
        let f = fixture();
        let mut places = MockPlaceRepository::new();
        places.expect_find_by_id().returning(|_| Ok(None));

        let result = service(f.plans, MockPlanPlaceRepository::new(), places)
            .create(
                f.plan_id,
                f.owner,
                CreatePlanPlaceDto {
                    place_id: Some(Uuid::new_v4()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(PlanPlaceError::PlaceNotFound(_))));
    }

    #[tokio::test]
    async fn create_rejects_parent_from_other_plan() {
        let f = fixture();
        let mut entries = MockPlanPlaceRepository::new();
        entries.expect_find_by_id().returning(|_, _| Ok(None));
        entries.expect_create().never();

        let result = service(f.plans, entries, MockPlaceRepository::new())
            .create(
                f.plan_id,
                f.owner,
                CreatePlanPlaceDto {
                    place_id: Some(Uuid::new_v4()),
                    parent_id: Some(Uuid::new_v4()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(PlanPlaceError::ParentNotFound(_))));
    }

    #[tokio::test]
    async fn create_rejects_negative_level() {
        let f = fixture();
        let result = service(f.plans, MockPlanPlaceRepository::new(), MockPlaceRepository::new())
            .create(
                f.plan_id,
                f.owner,
                CreatePlanPlaceDto {
                    place_id: Some(Uuid::new_v4()),
                    level: -1,
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(PlanPlaceError::InvalidLevel)));
    }

    #[tokio::test]
    async fn update_rejects_self_parent() {
        let f = fixture();
        let target = entry(f.plan_id, None);
        let target_id = target.id;
        let mut entries = MockPlanPlaceRepository::new();
        entries
            .expect_find_by_id()
            .returning(move |_, _| Ok(Some(target.clone())));

        let result = service(f.plans, entries, MockPlaceRepository::new())
            .update(
                f.plan_id,
                target_id,
                f.owner,
                UpdatePlanPlaceDto {
                    parent: ReferenceUpdate::Set(target_id),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(PlanPlaceError::SelfParent)));
    }

    #[tokio::test]
    async fn update_rejects_moving_under_descendant() {
        let f = fixture();
        let country = entry(f.plan_id, None);
        let city = entry(f.plan_id, Some(country.id));
        let (country_id, city_id) = (country.id, city.id);
        let all = vec![country.clone(), city.clone()];

        let mut entries = MockPlanPlaceRepository::new();
        entries.expect_find_by_id().returning(move |_, id| {
            Ok(if id == country_id {
                Some(country.clone())
            } else {
                Some(city.clone())
            })
        });
        entries
            .expect_list_by_plan()
            .returning(move |_| Ok(all.clone()));
        entries.expect_update().never();

        let result = service(f.plans, entries, MockPlaceRepository::new())
            .update(
                f.plan_id,
                country_id,
                f.owner,
                UpdatePlanPlaceDto {
                    parent: ReferenceUpdate::Set(city_id),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(PlanPlaceError::Cycle)));
    }

    #[tokio::test]
    async fn update_clears_parent_with_nil_id() {
        let f = fixture();
        let target = entry(f.plan_id, Some(Uuid::new_v4()));
        let target_id = target.id;
        let mut entries = MockPlanPlaceRepository::new();
        entries
            .expect_find_by_id()
            .returning(move |_, _| Ok(Some(target.clone())));
        entries
            .expect_update()
            .withf(|e| e.parent_id.is_none() && e.name.as_deref() == Some("Old town"))
            .returning(|e| Ok(Some(e.clone())));

        let updated = service(f.plans, entries, MockPlaceRepository::new())
            .update(
                f.plan_id,
                target_id,
                f.owner,
                UpdatePlanPlaceDto {
                    name: Some("Old town".into()),
                    parent: ReferenceUpdate::from_wire(Some(Uuid::nil())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.parent_id, None);
    }

    #[tokio::test]
    async fn delete_of_missing_entry_is_not_found() {
        let f = fixture();
        let mut entries = MockPlanPlaceRepository::new();
        entries.expect_soft_delete_subtree().returning(|_, _| Ok(0));

        let result = service(f.plans, entries, MockPlaceRepository::new())
            .delete(f.plan_id, Uuid::new_v4(), f.owner)
            .await;

        assert!(matches!(result, Err(PlanPlaceError::NotFound)));
    }

    #[tokio::test]
    async fn tree_nests_children() {
        let f = fixture();
        let root = entry(f.plan_id, None);
        let child = entry(f.plan_id, Some(root.id));
        let listed = vec![root.clone(), child.clone()];
        let mut entries = MockPlanPlaceRepository::new();
        entries
            .expect_list_by_plan()
            .returning(move |_| Ok(listed.clone()));

        let tree = service(f.plans, entries, MockPlaceRepository::new())
            .tree(f.plan_id, f.owner)
            .await
            .unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].entry.id, root.id);
        assert_eq!(tree[0].children[0].entry.id, child.id);
    }
}
