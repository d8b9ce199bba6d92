//! View tests for the user routes: profiles, the follow graph pages,
//! likes, and signup.

mod common;

use axum::http::StatusCode;

use common::*;

fn seed(state: &warbler_api::auth::AppState) {
    seed_users(state);
    state
        .db
        .create_message(Some(1234567), "message text1", TESTER1, None)
        .unwrap();
}

/// followertester follows tester1 and tester2; tester1 follows back.
fn setup_followers(state: &warbler_api::auth::AppState) {
    state.db.follow(TESTER3, TESTER1).unwrap();
    state.db.follow(TESTER3, TESTER2).unwrap();
    state.db.follow(TESTER1, TESTER3).unwrap();
}

#[tokio::test]
async fn following_page() {
    let (state, app) = test_app();
    seed(&state);
    setup_followers(&state);
    let cookie = session_for(TESTER3, "followertester");

    let res = get(&app, "/users/10000002/following", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_string(res).await;
    assert!(body.contains("tester1"));
    assert!(body.contains("tester2"));
    assert!(!body.contains("nofollow"));
}

#[tokio::test]
async fn followers_page() {
    let (state, app) = test_app();
    seed(&state);
    setup_followers(&state);
    let cookie = session_for(TESTER3, "followertester");

    let res = get(&app, "/users/10000002/followers", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_string(res).await;
    assert!(body.contains("tester1"));
    assert!(!body.contains("tester2"));
    assert!(!body.contains("nofollow"));
}

#[tokio::test]
async fn no_session_followers_page() {
    let (state, app) = test_app();
    seed(&state);

    let res = get(&app, "/users/10000002/followers", None).await;
    let res = follow_redirect(&app, res).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_string(res).await;
    assert!(body.contains("Access unauthorized."));
    assert!(body.contains("/signup"));
}

#[tokio::test]
async fn user_page() {
    let (state, app) = test_app();
    seed(&state);
    let cookie = session_for(TESTER2, "tester2");

    let res = get(&app, "/users/10000001", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_string(res).await;
    assert!(body.contains("@tester2"));
    assert!(body.contains("messages"));
}

#[tokio::test]
async fn user_page_lists_messages_newest_first() {
    let (state, app) = test_app();
    seed(&state);
    state
        .db
        .create_message(Some(1234569), "a later warble", TESTER1, None)
        .unwrap();
    let cookie = session_for(TESTER1, "tester1");

    let res = get(&app, "/users/10000000", Some(&cookie)).await;
    let body = body_string(res).await;
    assert!(body.contains("2 messages"));
    let later = body.find("a later warble").unwrap();
    let earlier = body.find("message text1").unwrap();
    assert!(later < earlier);
}

#[tokio::test]
async fn user_edit_page() {
    let (state, app) = test_app();
    seed(&state);
    let cookie = session_for(TESTER2, "tester2");

    let res = get(&app, "/users/profile", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_string(res).await;
    assert!(body.contains("tester2"));
    assert!(body.contains("messages"));
}

#[tokio::test]
async fn user_like() {
    let (state, app) = test_app();
    seed(&state);
    let cookie = session_for(TESTER2, "tester2");

    let res = post_form(&app, "/users/add_like/1234567", "", Some(&cookie)).await;
    let res = follow_redirect(&app, res).await;
    assert_eq!(res.status(), StatusCode::OK);

    let likes = state.db.likes_for_message(1234567).unwrap();
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0].user_id, TESTER2);
}

#[tokio::test]
async fn user_unlike() {
    let (state, app) = test_app();
    seed(&state);
    state.db.toggle_like(TESTER2, 1234567).unwrap();
    assert_eq!(state.db.count_likes_for_message(1234567).unwrap(), 1);
    let cookie = session_for(TESTER2, "tester2");

    let res = post_form(&app, "/users/add_like/1234567", "", Some(&cookie)).await;
    let res = follow_redirect(&app, res).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(state.db.count_likes_for_message(1234567).unwrap(), 0);
}

#[tokio::test]
async fn cannot_like_own_message() {
    let (state, app) = test_app();
    seed(&state);
    let cookie = session_for(TESTER1, "tester1");

    let res = post_form(&app, "/users/add_like/1234567", "", Some(&cookie)).await;
    let res = follow_redirect(&app, res).await;

    let body = body_string(res).await;
    assert!(body.contains("Access unauthorized."));
    assert_eq!(state.db.count_likes_for_message(1234567).unwrap(), 0);
}

#[tokio::test]
async fn likes_page_lists_liked_messages() {
    let (state, app) = test_app();
    seed(&state);
    state.db.toggle_like(TESTER2, 1234567).unwrap();
    let cookie = session_for(TESTER2, "tester2");

    let res = get(&app, "/users/10000001/likes", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_string(res).await.contains("message text1"));
}

#[tokio::test]
async fn follow_and_unfollow_routes() {
    let (state, app) = test_app();
    seed(&state);
    let cookie = session_for(TESTER4, "nofollow");

    let res = post_form(&app, "/users/follow/10000000", "", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert!(state.db.is_following(TESTER4, TESTER1).unwrap());

    let res = post_form(&app, "/users/stop_following/10000000", "", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert!(!state.db.is_following(TESTER4, TESTER1).unwrap());
}

#[tokio::test]
async fn sign_up() {
    let (state, app) = test_app();
    seed(&state);

    let res = post_form(
        &app,
        "/signup",
        "username=signuptest&email=testmail%40gmail.com&password=passtest",
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);

    let new_user = state
        .db
        .get_user_by_username("signuptest")
        .unwrap()
        .expect("signup should create the user");
    assert_eq!(new_user.email, "testmail@gmail.com");

    // The redirect carries the fresh session cookie to the new profile.
    let res = follow_redirect(&app, res).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_string(res).await.contains("@signuptest"));
}

#[tokio::test]
async fn sign_up_duplicate_username_flashes() {
    let (state, app) = test_app();
    seed(&state);

    let res = post_form(
        &app,
        "/signup",
        "username=tester1&email=fresh%40email.com&password=passtest",
        None,
    )
    .await;
    let res = follow_redirect(&app, res).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        body_string(res)
            .await
            .contains("Username or email already taken.")
    );
}

#[tokio::test]
async fn login_and_logout() {
    let (state, app) = test_app();
    seed(&state);

    let res = post_form(&app, "/login", "username=tester2&password=testpw", None).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    let session = first_set_cookie(&res).expect("login should set the session cookie");
    assert!(session.starts_with("curr_user="));

    let res = post_form(&app, "/login", "username=tester2&password=failtest", None).await;
    let res = follow_redirect(&app, res).await;
    assert!(body_string(res).await.contains("Invalid credentials."));

    let res = post_form(&app, "/logout", "", Some(&session)).await;
    assert_eq!(res.status(), StatusCode::FOUND);
}
