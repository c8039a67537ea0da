use super::*;

/// Tests closing a ticket.
///
/// Expected: Ok(true) once, after which the member has no open ticket
#[tokio::test]
async fn closes_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ticket = create_ticket(db, "1", "7").await?;
    let channel_id: u64 = ticket.channel_id.parse().unwrap();

    let repo = TicketRepository::new(db);

    assert!(repo.close(channel_id).await?);
    assert!(!repo.close(channel_id).await?);
    assert!(repo.find_open_for_user(1, 7).await?.is_none());
    assert!(repo.find_by_channel(channel_id).await?.unwrap().closed);

    Ok(())
}
