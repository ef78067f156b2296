// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Persistence, PersistenceError};
use secret_draw_domain::PoolId;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_keys_enforced() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = Persistence::new_in_memory().unwrap();
    let mut db2: Persistence = Persistence::new_in_memory().unwrap();
    let pool_id: PoolId = PoolId::new("isolated");

    db1.create_pool(&pool_id, "Only in db1").unwrap();

    assert!(db1.get_pool(&pool_id).is_ok());
    assert_eq!(
        db2.get_pool(&pool_id),
        Err(PersistenceError::PoolNotFound(String::from("isolated")))
    );
}

#[test]
fn test_file_database_persists_across_connections() {
    let path = std::env::temp_dir().join(format!(
        "secret_draw_test_{}_{}.db",
        std::process::id(),
        line!()
    ));
    let _ = std::fs::remove_file(&path);
    let pool_id: PoolId = PoolId::new("on-disk");

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        persistence.create_pool(&pool_id, "Disk").unwrap();
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    assert_eq!(reopened.get_pool(&pool_id).unwrap().name, "Disk");

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}
