#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use sea_orm::{
        DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult, RuntimeErr,
        SqlErr, Value,
    };

    use quill_core::Id;
    use quill_core::domain::{Post, SortOptions};
    use quill_core::error::RepoError;
    use quill_core::ports::PostRepository;

    use crate::database::entity::post;
    use crate::database::postgres_repo::{PostgresPostRepository, classify, map_db_err};

    fn model(id: Id, author_id: Id, text: &str) -> post::Model {
        post::Model {
            id: id.to_vec(),
            author_id: author_id.to_vec(),
            text: text.to_owned(),
            updated_at: None,
        }
    }

    /// SQL of every statement the mock connection saw.
    fn logged_sql(db: DatabaseConnection) -> Vec<String> {
        db.into_transaction_log()
            .iter()
            .flat_map(|txn| txn.statements().iter().map(|stmt| stmt.sql.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_get_post_by_id() {
        let post_id = Id::new();
        let author_id = Id::new();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(post_id, author_id, "Test Post")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let post = repo.get(post_id).await.unwrap();

        assert_eq!(post.id, post_id);
        assert_eq!(post.author_id, author_id);
        assert_eq!(post.text, "Test Post");
        assert!(post.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_get_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(matches!(
            repo.get(Id::new()).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_get_malformed_row_is_query_error() {
        let mut row = model(Id::new(), Id::new(), "text");
        row.author_id = vec![1, 2, 3];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(matches!(
            repo.get(Id::new()).await,
            Err(RepoError::Query(_))
        ));
    }

    #[tokio::test]
    async fn test_create_inserts_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let mut post = Post::new(Id::new(), "hello".to_string());
        post.id = Id::new();

        repo.create(&post).await.unwrap();

        let sql = logged_sql(repo.into_db());
        assert_eq!(sql.len(), 1);
        assert!(sql[0].starts_with(r#"INSERT INTO "post""#));
    }

    #[tokio::test]
    async fn test_create_without_id_never_reaches_database() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = PostgresPostRepository::new(db);

        let err = repo
            .create(&Post::new(Id::new(), "hello".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::InvalidInput(_)));
        assert!(logged_sql(repo.into_db()).is_empty());
    }

    #[tokio::test]
    async fn test_update_is_scoped_by_author() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let mut post = Post::new(Id::new(), "edited".to_string());
        post.id = Id::new();

        // No matching row is still success.
        repo.update(&post).await.unwrap();

        let sql = logged_sql(repo.into_db());
        assert_eq!(sql.len(), 1);
        assert!(sql[0].starts_with(r#"UPDATE "post" SET "text" = $1, "updated_at" = $2"#));
        assert!(sql[0].contains(r#""post"."id" = $3"#));
        assert!(sql[0].contains(r#""post"."author_id" = $4"#));
    }

    #[tokio::test]
    async fn test_delete_is_scoped_by_author() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let id = Id::new();
        let author = Id::new();

        repo.delete(id, author).await.unwrap();
        // Deleting again affects nothing and is not an error.
        repo.delete(id, author).await.unwrap();

        let sql = logged_sql(repo.into_db());
        assert_eq!(sql.len(), 2);
        assert!(sql[0].starts_with(r#"DELETE FROM "post""#));
        assert!(sql[0].contains(r#""post"."id" = $1"#));
        assert!(sql[0].contains(r#""post"."author_id" = $2"#));
    }

    #[tokio::test]
    async fn test_get_posts_forward_after_cursor() {
        let author = Id::new();
        let cursor = Id::new();
        let rows = vec![
            model(Id::at(Utc::now()), author, "P3"),
            model(Id::at(Utc::now()), author, "P4"),
        ];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([rows])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let posts = repo
            .get_posts(author, &SortOptions::first(2).after(cursor))
            .await
            .unwrap();

        let texts: Vec<_> = posts.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["P3", "P4"]);

        let sql = logged_sql(repo.into_db());
        assert!(sql[0].contains(r#""post"."author_id" = $1"#));
        assert!(sql[0].contains(r#""post"."id" > $2"#));
        assert!(sql[0].contains(r#"ORDER BY "post"."id" ASC"#));
        assert!(sql[0].contains("LIMIT $3"));
    }

    #[tokio::test]
    async fn test_get_posts_backward_before_cursor() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let posts = repo
            .get_posts(Id::new(), &SortOptions::last(5).before(Id::new()))
            .await
            .unwrap();

        assert!(posts.is_empty());

        let sql = logged_sql(repo.into_db());
        assert!(sql[0].contains(r#""post"."id" < $2"#));
        assert!(sql[0].contains(r#"ORDER BY "post"."id" DESC"#));
    }

    #[tokio::test]
    async fn test_get_posts_nil_cursor_adds_no_bound() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        repo.get_posts(Id::new(), &SortOptions::first(5).after(Id::nil()))
            .await
            .unwrap();

        let sql = logged_sql(repo.into_db());
        assert!(!sql[0].contains(r#""post"."id" >"#));
    }

    #[tokio::test]
    async fn test_get_posts_without_limit_never_reaches_database() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = PostgresPostRepository::new(db);

        let err = repo
            .get_posts(Id::new(), &SortOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::InvalidInput(_)));
        assert!(logged_sql(repo.into_db()).is_empty());
    }

    #[tokio::test]
    async fn test_get_total_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(5)),
            )])]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert_eq!(repo.get_total_count(Id::new()).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_query_failure_is_query_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("boom".to_owned())])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(matches!(
            repo.get(Id::new()).await,
            Err(RepoError::Query(_))
        ));
    }

    #[test]
    fn test_connection_failure_is_connection_error() {
        let err = map_db_err(DbErr::Conn(RuntimeErr::Internal("refused".to_owned())));
        assert!(matches!(err, RepoError::Connection(_)));
    }

    #[test]
    fn test_unique_violation_is_constraint_error() {
        let err = classify(
            DbErr::Custom("insert failed".to_owned()),
            Some(SqlErr::UniqueConstraintViolation(
                "duplicate key value violates unique constraint \"post_pkey\"".to_owned(),
            )),
        );

        assert!(matches!(err, RepoError::Constraint(msg) if msg.contains("post_pkey")));
    }

    #[test]
    fn test_other_sql_errors_are_query_errors() {
        let err = classify(
            DbErr::Custom("insert failed".to_owned()),
            Some(SqlErr::ForeignKeyConstraintViolation("fk".to_owned())),
        );

        assert!(matches!(err, RepoError::Query(_)));
    }

    #[test]
    fn test_text_column_matches_schema() {
        use sea_orm::sea_query::StringLen;
        use sea_orm::{ColumnTrait, ColumnType};

        assert_eq!(
            post::Column::Text.def().get_column_type(),
            &ColumnType::String(StringLen::N(500))
        );
    }
}
