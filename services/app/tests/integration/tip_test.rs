use friendlytask::domain::types::LikeState;
use friendlytask::error::ServiceError;
use friendlytask::usecase::tip::{
    AddCommentUseCase, GetTipUseCase, ListTipsUseCase, PostTipUseCase, ToggleLikeUseCase,
};

use crate::helpers::{
    MockCommentRepo, MockLikeRepo, MockTipRepo, MockUserRepo, test_user,
};

#[tokio::test]
async fn should_charge_twenty_tokens_per_posted_tip() {
    let author = test_user("ada", 40);
    let users = MockUserRepo::with(vec![author.clone()]);
    let repo = MockTipRepo::for_users(&users);
    let uc = PostTipUseCase { tips: repo.clone() };

    uc.execute(author.id, "Batch your email checks.".to_owned())
        .await
        .unwrap();
    uc.execute(author.id, "Plan tomorrow tonight.".to_owned())
        .await
        .unwrap();

    assert_eq!(users.users.lock().unwrap()[0].tokens, 0);
    assert_eq!(repo.count(), 2);
}

#[tokio::test]
async fn should_reject_tip_when_balance_is_short_and_store_nothing() {
    let author = test_user("ada", 19);
    let users = MockUserRepo::with(vec![author.clone()]);
    let repo = MockTipRepo::for_users(&users);

    let result = PostTipUseCase { tips: repo.clone() }
        .execute(author.id, "Take breaks every hour.".to_owned())
        .await;

    assert!(
        matches!(result, Err(ServiceError::InsufficientTokens)),
        "expected InsufficientTokens, got {result:?}"
    );
    assert_eq!(repo.count(), 0, "a rejected tip must not be stored");
    assert_eq!(
        users.users.lock().unwrap()[0].tokens,
        19,
        "a rejected tip must not charge the author"
    );
}

#[tokio::test]
async fn should_validate_tip_length_before_charging() {
    let author = test_user("ada", 100);
    let users = MockUserRepo::with(vec![author.clone()]);
    let repo = MockTipRepo::for_users(&users);
    let uc = PostTipUseCase { tips: repo.clone() };

    let short = uc.execute(author.id, "too short".to_owned()).await;
    assert!(matches!(short, Err(ServiceError::ContentLength)));

    let long = uc.execute(author.id, "x".repeat(141)).await;
    assert!(matches!(long, Err(ServiceError::ContentLength)));

    assert_eq!(
        users.users.lock().unwrap()[0].tokens,
        100,
        "invalid content must be rejected before any charge"
    );

    uc.execute(author.id, "0123456789".to_owned()).await.unwrap();
    uc.execute(author.id, "y".repeat(140)).await.unwrap();
    assert_eq!(repo.count(), 2);
}

#[tokio::test]
async fn should_list_tips_newest_first() {
    let author = test_user("ada", 100);
    let users = MockUserRepo::with(vec![author.clone()]);
    let repo = MockTipRepo::for_users(&users);
    let post = PostTipUseCase { tips: repo.clone() };

    post.execute(author.id, "First tip of the day.".to_owned())
        .await
        .unwrap();
    post.execute(author.id, "Second tip of the day.".to_owned())
        .await
        .unwrap();

    let tips = ListTipsUseCase { tips: repo }.execute().await.unwrap();
    assert_eq!(tips.len(), 2);
    assert!(
        tips[0].created_at >= tips[1].created_at,
        "tips should be listed newest first"
    );
}

#[tokio::test]
async fn should_return_tip_thread_with_comments_oldest_first() {
    let author = test_user("ada", 20);
    let reader = test_user("grace", 0);
    let users = MockUserRepo::with(vec![author.clone(), reader.clone()]);
    let tips = MockTipRepo::for_users(&users);
    let comments = MockCommentRepo::empty();

    let tip = PostTipUseCase { tips: tips.clone() }
        .execute(author.id, "Write it down, then do it.".to_owned())
        .await
        .unwrap();

    let add = AddCommentUseCase {
        tips: tips.clone(),
        comments: comments.clone(),
    };
    add.execute(reader.id, tip.id, "Works for me.".to_owned())
        .await
        .unwrap();
    add.execute(author.id, tip.id, "Glad it helps!".to_owned())
        .await
        .unwrap();

    let thread = GetTipUseCase { tips, comments }.execute(tip.id).await.unwrap();
    assert_eq!(thread.tip.id, tip.id);
    assert_eq!(thread.comments.len(), 2);
    assert!(
        thread.comments[0].created_at <= thread.comments[1].created_at,
        "comments should read oldest first"
    );
}

#[tokio::test]
async fn should_reject_comment_on_missing_tip() {
    let users = MockUserRepo::empty();
    let result = AddCommentUseCase {
        tips: MockTipRepo::for_users(&users),
        comments: MockCommentRepo::empty(),
    }
    .execute(
        uuid::Uuid::now_v7(),
        uuid::Uuid::now_v7(),
        "Interesting point.".to_owned(),
    )
    .await;

    assert!(matches!(result, Err(ServiceError::TipNotFound)));
}

#[tokio::test]
async fn should_reject_comment_outside_length_bounds() {
    let author = test_user("ada", 20);
    let users = MockUserRepo::with(vec![author.clone()]);
    let tips = MockTipRepo::for_users(&users);

    let tip = PostTipUseCase { tips: tips.clone() }
        .execute(author.id, "Do the hardest thing first.".to_owned())
        .await
        .unwrap();

    let uc = AddCommentUseCase {
        tips,
        comments: MockCommentRepo::empty(),
    };

    let short = uc.execute(author.id, tip.id, "nope".to_owned()).await;
    assert!(matches!(short, Err(ServiceError::ContentLength)));

    let long = uc.execute(author.id, tip.id, "x".repeat(141)).await;
    assert!(matches!(long, Err(ServiceError::ContentLength)));

    uc.execute(author.id, tip.id, "12345".to_owned()).await.unwrap();
}

#[tokio::test]
async fn should_toggle_like_on_and_off() {
    let author = test_user("ada", 20);
    let reader = test_user("grace", 0);
    let users = MockUserRepo::with(vec![author.clone(), reader.clone()]);
    let tips = MockTipRepo::for_users(&users);
    let likes = MockLikeRepo::empty();

    let tip = PostTipUseCase { tips: tips.clone() }
        .execute(author.id, "Silence your notifications.".to_owned())
        .await
        .unwrap();

    let uc = ToggleLikeUseCase {
        tips,
        likes: likes.clone(),
    };

    let first = uc.execute(reader.id, tip.id).await.unwrap();
    assert_eq!(first, LikeState::Liked);
    assert_eq!(likes.count(), 1);

    let second = uc.execute(reader.id, tip.id).await.unwrap();
    assert_eq!(second, LikeState::Unliked);
    assert_eq!(likes.count(), 0, "toggling twice leaves no like behind");
}

#[tokio::test]
async fn should_keep_likes_independent_per_user() {
    let author = test_user("ada", 20);
    let reader = test_user("grace", 0);
    let users = MockUserRepo::with(vec![author.clone(), reader.clone()]);
    let tips = MockTipRepo::for_users(&users);
    let likes = MockLikeRepo::empty();

    let tip = PostTipUseCase { tips: tips.clone() }
        .execute(author.id, "Stand up and stretch hourly.".to_owned())
        .await
        .unwrap();

    let uc = ToggleLikeUseCase {
        tips,
        likes: likes.clone(),
    };
    uc.execute(author.id, tip.id).await.unwrap();
    uc.execute(reader.id, tip.id).await.unwrap();
    assert_eq!(likes.count(), 2);

    assert_eq!(uc.execute(reader.id, tip.id).await.unwrap(), LikeState::Unliked);
    assert_eq!(likes.count(), 1, "only the toggling user's like is removed");
}

#[tokio::test]
async fn should_reject_like_on_missing_tip() {
    let users = MockUserRepo::empty();
    let result = ToggleLikeUseCase {
        tips: MockTipRepo::for_users(&users),
        likes: MockLikeRepo::empty(),
    }
    .execute(uuid::Uuid::now_v7(), uuid::Uuid::now_v7())
    .await;

    assert!(matches!(result, Err(ServiceError::TipNotFound)));
}
