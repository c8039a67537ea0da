use super::*;

/// Tests opening a ticket.
///
/// Expected: Ok with the ticket open and found as the member's open ticket
#[tokio::test]
async fn creates_open_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo
        .create(CreateTicketParam {
            guild_id: 1,
            channel_id: 50,
            user_id: 7,
            topic: TicketTopic::Report,
        })
        .await?;

    assert!(!ticket.closed);
    assert_eq!(ticket.topic, TicketTopic::Report);
    assert_eq!(repo.find_open_for_user(1, 7).await?.map(|t| t.id), Some(ticket.id));
    assert_eq!(repo.find_by_channel(50).await?.map(|t| t.user_id), Some(7));

    Ok(())
}
