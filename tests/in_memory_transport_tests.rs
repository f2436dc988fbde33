use broadside::transport::in_memory::InMemoryTransport;
use broadside::transport::Transport;
use broadside::{Coordinate, Frame, ShotMessage};

fn frame(x: u8, y: u8, hit: bool) -> Frame {
    ShotMessage::result(Coordinate::new(x, y).unwrap(), hit).encode()
}

#[tokio::test(flavor = "multi_thread")]
async fn frames_arrive_in_order() -> anyhow::Result<()> {
    let (mut a, mut b) = InMemoryTransport::pair();

    let sender = tokio::spawn(async move {
        for i in 0..10u8 {
            a.send(frame(i, 9 - i, i % 2 == 0)).await.unwrap();
        }
        a
    });

    for i in 0..10u8 {
        assert_eq!(b.recv().await?, frame(i, 9 - i, i % 2 == 0));
    }
    let _a = sender.await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn both_directions_work() -> anyhow::Result<()> {
    let (mut a, mut b) = InMemoryTransport::pair();
    a.send(frame(1, 2, false)).await?;
    assert_eq!(b.recv().await?, frame(1, 2, false));
    b.send(frame(1, 2, true)).await?;
    assert_eq!(a.recv().await?, frame(1, 2, true));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn queued_frames_survive_close() -> anyhow::Result<()> {
    let (mut a, mut b) = InMemoryTransport::pair();
    a.send(frame(3, 3, true)).await?;
    a.close().await?;

    assert_eq!(b.recv().await?, frame(3, 3, true));
    assert!(b.recv().await.is_err());
    assert!(b.send(frame(0, 0, false)).await.is_err());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn dropping_one_end_wakes_the_other() -> anyhow::Result<()> {
    let (a, mut b) = InMemoryTransport::pair();
    let reader = tokio::spawn(async move { b.recv().await });
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    drop(a);
    assert!(reader.await?.is_err());
    Ok(())
}
