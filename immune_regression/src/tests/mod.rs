mod common;

mod test_migration_merge;
