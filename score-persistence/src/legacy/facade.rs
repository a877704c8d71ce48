use anyhow::Result;
use serde_json::Value;
use tracing::info;

use score_types::{GlobalStats, LegacyUser, StatLeader, User, UserStats};

use super::store::LegacyStore;
use crate::Store;

fn legacy_user(store: &dyn LegacyStore, login: &str) -> Result<Option<LegacyUser>> {
    match store.get(&format!("users.{login}")) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

fn legacy_name(old: &LegacyUser, login: &str) -> String {
    old.username
        .clone()
        .or_else(|| old.user.clone())
        .unwrap_or_else(|| login.to_owned())
}

/// Looks up a user by Twitch id, creating or migrating on first sight.
///
/// When the old store knows this login and the database does not, the
/// identity fields (flag, previous guess, last location) move into the new
/// row and are dropped from the old store. The stat counters stay behind so
/// the stats reads below can keep merging them.
///
/// Returns the old-store entry too, if there was one, so callers can inspect
/// what was carried over.
pub async fn get_or_migrate_user(
    store: &Store,
    legacy: &mut dyn LegacyStore,
    user_id: &str,
    login: &str,
    display_name: &str,
) -> Result<(Option<LegacyUser>, User)> {
    let old = legacy_user(legacy, login)?;

    let user = match (store.users().get_user(user_id).await?, &old) {
        (Some(user), _) => user,
        (None, Some(old_user)) => {
            info!(user_id, login, "migrating user from the legacy store");
            let user = store
                .users()
                .migrate_user(user_id, display_name, old_user)
                .await?;
            for field in ["flag", "previousGuess", "lastLocation"] {
                legacy.delete(&format!("users.{login}.{field}"))?;
            }
            user
        }
        (None, None) => store.users().get_or_create_user(user_id, display_name).await?,
    };

    Ok((old, user))
}

/// User stats with the old store's counters folded in: counts add up, best
/// streak takes the maximum. The mean score and the current streak only ever
/// come from the database; the old store never tracked them.
pub async fn get_user_stats(
    store: &Store,
    legacy: &dyn LegacyStore,
    user_id: &str,
    login: &str,
) -> Result<Option<UserStats>> {
    let stats = store.stats().get_user_stats(user_id).await?;
    let old = legacy_user(legacy, login)?;

    Ok(match (stats, old) {
        (Some(mut stats), Some(old)) => {
            stats.best_streak = stats.best_streak.max(old.best_streak);
            stats.nb_guesses += old.nb_guesses;
            stats.correct_guesses += old.correct_guesses;
            stats.perfects += old.perfects;
            stats.victories += old.victories;
            Some(stats)
        }
        (Some(stats), None) => Some(stats),
        (None, Some(old)) => Some(UserStats {
            username: legacy_name(&old, login),
            flag: old.flag.clone(),
            streak: 0,
            best_streak: old.best_streak,
            nb_guesses: old.nb_guesses,
            correct_guesses: old.correct_guesses,
            mean_score: None,
            perfects: old.perfects,
            victories: old.victories,
        }),
        (None, None) => None,
    })
}

fn challenge(leader: &mut Option<StatLeader>, id: &str, username: &str, count: i64) {
    // Strictly greater: on a tie the database record keeps the title.
    if count > leader.as_ref().map_or(0, |l| l.count) {
        *leader = Some(StatLeader {
            id: id.to_owned(),
            username: username.to_owned(),
            count,
        });
    }
}

/// Channel records with old-store entries competing against the database
/// ones. An old-store record only takes a title when it beats the database
/// holder outright; its id is the login name, the only identity the old
/// store had.
pub async fn get_global_stats(store: &Store, legacy: &dyn LegacyStore) -> Result<GlobalStats> {
    let mut stats = store.stats().get_global_stats().await?;

    let Some(Value::Object(users)) = legacy.get("users") else {
        return Ok(stats);
    };

    for (login, value) in users {
        let Ok(old) = serde_json::from_value::<LegacyUser>(value) else {
            continue;
        };
        let name = legacy_name(&old, &login);
        challenge(&mut stats.streak, &login, &name, old.best_streak.into());
        challenge(&mut stats.victories, &login, &name, old.victories);
        challenge(&mut stats.perfects, &login, &name, old.perfects);
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legacy::store::MemoryStore;
    use crate::repositories::test_support::{game_seed, guess, target};
    use serde_json::json;

    async fn setup() -> Store {
        Store::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_creates_a_new_user() {
        let store = setup().await;
        let mut legacy = MemoryStore(json!({}));

        let (old, user) =
            get_or_migrate_user(&store, &mut legacy, "1234567", "libreanna", "LibReAnna")
                .await
                .unwrap();

        assert!(old.is_none());
        assert_eq!(user.id, "1234567");
        assert_eq!(user.username, "LibReAnna");
    }

    #[tokio::test]
    async fn test_returns_a_user_that_already_exists() {
        let store = setup().await;
        let mut legacy = MemoryStore(json!({}));

        store
            .users()
            .get_or_create_user("1234567", "LibReAnna")
            .await
            .unwrap();

        let (old, user) =
            get_or_migrate_user(&store, &mut legacy, "1234567", "libreanna", "LibReAnna")
                .await
                .unwrap();

        assert!(old.is_none());
        assert_eq!(user.id, "1234567");
        assert_eq!(user.username, "LibReAnna");
    }

    #[tokio::test]
    async fn test_migrates_flag_from_the_old_store() {
        let store = setup().await;
        let mut legacy =
            MemoryStore(json!({ "users": { "libreanna": { "user": "libreanna", "flag": "jo" } } }));

        let (old, user) =
            get_or_migrate_user(&store, &mut legacy, "1234567", "libreanna", "LibReAnna")
                .await
                .unwrap();

        assert_eq!(old.unwrap().flag.as_deref(), Some("jo"));
        assert_eq!(user.id, "1234567");
        assert_eq!(user.username, "LibReAnna");
        assert_eq!(user.flag.as_deref(), Some("jo"));

        // The identity fields moved out of the old store.
        assert_eq!(legacy.get("users.libreanna.flag"), None);
    }

    #[tokio::test]
    async fn test_merges_stats_from_the_old_store() {
        let store = setup().await;
        let mut legacy = MemoryStore(json!({
            "users": {
                "libreanna": {
                    "user": "libreanna",
                    "correctGuesses": 47,
                    "nbGuesses": 69,
                    "bestStreak": 8,
                    "perfects": 3,
                    "victories": 2,
                },
            },
        }));

        get_or_migrate_user(&store, &mut legacy, "1234567", "libreanna", "LibReAnna")
            .await
            .unwrap();

        // Counters survive the migration and show through as-is while the
        // database has nothing.
        let stats = get_user_stats(&store, &legacy, "1234567", "libreanna")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stats.correct_guesses, 47);
        assert_eq!(stats.nb_guesses, 69);
        assert_eq!(stats.best_streak, 8);
        assert_eq!(stats.perfects, 3);
        assert_eq!(stats.victories, 2);

        // New guesses add on top.
        let games = store.games();
        games.create_game(&game_seed("test")).await.unwrap();
        let round = games.create_round("test", &target(0.0, 0.0)).await.unwrap();
        games
            .create_guess(&round, "1234567", &guess(5000, 1.0, 7))
            .await
            .unwrap();

        let stats = get_user_stats(&store, &legacy, "1234567", "libreanna")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stats.correct_guesses, 48);
        assert_eq!(stats.nb_guesses, 70);
        assert_eq!(stats.best_streak, 8);
        assert_eq!(stats.perfects, 4);
        assert_eq!(stats.victories, 2);
    }

    #[tokio::test]
    async fn test_user_stats_without_any_record() {
        let store = setup().await;
        let legacy = MemoryStore(json!({}));

        let stats = get_user_stats(&store, &legacy, "ghost", "ghost")
            .await
            .unwrap();
        assert!(stats.is_none());
    }

    #[tokio::test]
    async fn test_user_stats_from_old_store_only() {
        let store = setup().await;
        let legacy = MemoryStore(json!({
            "users": {
                "fran_stan": {
                    "user": "fran_stan",
                    "username": "fran_stan",
                    "nbGuesses": 12,
                    "correctGuesses": 5,
                    "bestStreak": 4,
                },
            },
        }));

        let stats = get_user_stats(&store, &legacy, "1234568", "fran_stan")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stats.username, "fran_stan");
        assert_eq!(stats.nb_guesses, 12);
        assert_eq!(stats.correct_guesses, 5);
        assert_eq!(stats.best_streak, 4);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.mean_score, None);
    }

    /// Seeds a won five-round game plus a two-round streak for one user.
    async fn seed_champion(store: &Store, user_id: &str, username: &str) {
        store
            .users()
            .get_or_create_user(user_id, username)
            .await
            .unwrap();

        let games = store.games();
        games.create_game(&game_seed("test")).await.unwrap();
        for i in 0..5 {
            let round = games
                .create_round("test", &target(i as f64, 0.0))
                .await
                .unwrap();
            games
                .create_guess(&round, user_id, &guess(5000, 0.0, 0))
                .await
                .unwrap();
            if i < 2 {
                store.streaks().add_user_streak(user_id, &round).await.unwrap();
            }
        }
    }

    #[tokio::test]
    async fn test_global_stats_without_old_entries() {
        let store = setup().await;
        let legacy = MemoryStore(json!({}));

        seed_champion(&store, "1234567", "LibReAnna").await;

        let global = get_global_stats(&store, &legacy).await.unwrap();
        assert_eq!(global.streak.unwrap().username, "LibReAnna");
        assert_eq!(global.victories.unwrap().username, "LibReAnna");
        assert_eq!(global.perfects.unwrap().username, "LibReAnna");
    }

    #[tokio::test]
    async fn test_global_stats_account_for_the_old_store() {
        let store = setup().await;
        let legacy = MemoryStore(json!({
            "users": {
                "fran_stan": {
                    "user": "fran_stan",
                    "username": "fran_stan",
                    "bestStreak": 11,
                    "victories": 1,
                    "perfects": 3,
                },
            },
        }));

        // Database: a 2-round streak, one victory, five perfects.
        seed_champion(&store, "1234567", "LibReAnna").await;

        let global = get_global_stats(&store, &legacy).await.unwrap();

        // The old streak record beats the database one and is keyed by login.
        let streak = global.streak.unwrap();
        assert_eq!(streak.id, "fran_stan");
        assert_eq!(streak.username, "fran_stan");
        assert_eq!(streak.count, 11);

        // Victories tie at one each: the database holder keeps the title.
        let victories = global.victories.unwrap();
        assert_eq!(victories.id, "1234567");
        assert_eq!(victories.count, 1);

        let perfects = global.perfects.unwrap();
        assert_eq!(perfects.username, "LibReAnna");
        assert_eq!(perfects.count, 5);
    }
}
